/// Render loop - drives a SceneManager until cancelled
///
/// Each iteration checks the cancellation token, hands pending load
/// events to the manager, ticks it (controls + one frame once a model is
/// ready) and then waits on the frame scheduler. The token is the only
/// stop signal; it can be cancelled from another thread, e.g. a window
/// close handler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::config::LoopConfig;
use crate::error::Result;
use crate::loader::ModelLoader;
use crate::scene::SceneManager;

const SOURCE: &str = "viewer::RenderLoop";

// ============================================================================
// Cancellation
// ============================================================================

/// Shared stop flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every loop holding a clone of this token to stop
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

// ============================================================================
// Frame pacing
// ============================================================================

/// Decides when the next loop iteration may start.
pub trait FrameScheduler {
    /// Block until the next frame is due
    fn wait_for_next_frame(&mut self);
}

/// Sleeps so iterations start at a fixed rate.
///
/// A frame that overruns its slot does not cause a burst of catch-up
/// frames; the schedule restarts from the late frame.
#[derive(Debug, Clone)]
pub struct FixedRateScheduler {
    interval: Duration,
    next_frame: Option<Instant>,
}

impl FixedRateScheduler {
    /// `target_fps` of zero is treated as one frame per second
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / target_fps.max(1),
            next_frame: None,
        }
    }

    pub fn from_config(config: &LoopConfig) -> Self {
        Self::new(config.target_fps)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedRateScheduler {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn wait_for_next_frame(&mut self) {
        let now = Instant::now();
        let due = self.next_frame.unwrap_or(now + self.interval);
        if due > now {
            std::thread::sleep(due - now);
            self.next_frame = Some(due + self.interval);
        } else {
            self.next_frame = Some(now + self.interval);
        }
    }
}

/// Never waits. For tests and offline rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl FrameScheduler for ImmediateScheduler {
    fn wait_for_next_frame(&mut self) {}
}

// ============================================================================
// Loop
// ============================================================================

/// Why `RenderLoop::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    FrameLimit,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopStats {
    /// Loop iterations, rendered or not
    pub iterations: u64,
    pub frames_rendered: u64,
    pub load_events: u64,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
}

impl LoopStats {
    /// Mean wall time per iteration
    pub fn average_frame_time(&self) -> Option<Duration> {
        u32::try_from(self.iterations)
            .ok()
            .filter(|&n| n > 0)
            .map(|n| self.elapsed / n)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderLoop {
    max_frames: Option<u64>,
}

impl RenderLoop {
    /// Loop that runs until cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Also stop after `max_frames` iterations
    pub fn with_max_frames(max_frames: u64) -> Self {
        Self { max_frames: Some(max_frames) }
    }

    pub fn from_config(config: &LoopConfig) -> Self {
        Self { max_frames: config.max_frames }
    }

    pub fn max_frames(&self) -> Option<u64> {
        self.max_frames
    }

    /// Run until `token` is cancelled or the frame limit is reached.
    ///
    /// A render error stops the loop and is returned.
    pub fn run(
        &self,
        manager: &mut SceneManager,
        loader: &mut dyn ModelLoader,
        scheduler: &mut dyn FrameScheduler,
        token: &CancellationToken,
    ) -> Result<LoopStats> {
        let start = Instant::now();
        let mut iterations = 0;
        let mut frames_rendered = 0;
        let mut load_events = 0;

        crate::viewer_info!(SOURCE, "Render loop started (frame limit: {:?})", self.max_frames);

        let stop_reason = loop {
            if token.is_cancelled() {
                break StopReason::Cancelled;
            }
            if self.max_frames.is_some_and(|max| iterations >= max) {
                break StopReason::FrameLimit;
            }

            load_events += manager.pump_loader(loader) as u64;
            if manager.tick()? {
                frames_rendered += 1;
            }
            iterations += 1;

            scheduler.wait_for_next_frame();
        };

        let stats = LoopStats {
            iterations,
            frames_rendered,
            load_events,
            elapsed: start.elapsed(),
            stop_reason,
        };
        crate::viewer_info!(
            SOURCE,
            "Render loop stopped ({:?}) after {} iterations, {} frames",
            stats.stop_reason,
            stats.iterations,
            stats.frames_rendered
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "render_loop_tests.rs"]
mod tests;
