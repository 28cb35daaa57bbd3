/// Scripted loader for tests and headless runs.
///
/// Replays a fixed list of events after every `begin`. Events past the
/// first terminal one are dropped so the sequencing contract holds even
/// for a sloppy script.

use std::collections::VecDeque;
use crate::error::Error;
use crate::scene::ModelNode;
use super::{LoadEvent, ModelLoader};

#[derive(Debug, Clone, Default)]
pub struct MockLoader {
    script: Vec<LoadEvent>,
    pending: VecDeque<LoadEvent>,
    requested: Vec<String>,
}

impl MockLoader {
    pub fn new(script: Vec<LoadEvent>) -> Self {
        Self { script, pending: VecDeque::new(), requested: Vec::new() }
    }

    /// `steps` progress events over `total` bytes, then `Loaded`.
    pub fn succeeding(node: ModelNode, total: u64, steps: u64) -> Self {
        let steps = steps.max(1);
        let mut script: Vec<LoadEvent> = (1..=steps)
            .map(|i| LoadEvent::Progress { loaded: total * i / steps, total: Some(total) })
            .collect();
        script.push(LoadEvent::Loaded { node });
        Self::new(script)
    }

    /// One progress event of unknown size, then `Failed`.
    pub fn failing(path: &str, reason: &str) -> Self {
        Self::new(vec![
            LoadEvent::Progress { loaded: 0, total: None },
            LoadEvent::Failed {
                error: Error::AssetLoadFailed {
                    path: path.to_string(),
                    reason: reason.to_string(),
                },
            },
        ])
    }

    /// Paths passed to `begin`, oldest first.
    pub fn requested_paths(&self) -> &[String] {
        &self.requested
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl ModelLoader for MockLoader {
    fn begin(&mut self, path: &str) {
        self.requested.push(path.to_string());
        self.pending.clear();
        for event in &self.script {
            self.pending.push_back(event.clone());
            if event.is_terminal() {
                break;
            }
        }
    }

    fn poll(&mut self) -> Option<LoadEvent> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
#[path = "mock_loader_tests.rs"]
mod tests;
