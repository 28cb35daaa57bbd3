use crate::error::Error;
use crate::scene::ModelNode;

/// Outcome of one step of a model load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// Bytes received so far; `total` is `None` when the size is unknown
    Progress { loaded: u64, total: Option<u64> },
    /// The model tree, ready to add to the scene
    Loaded { node: ModelNode },
    /// The load failed and will not be retried
    Failed { error: Error },
}

impl LoadEvent {
    /// Completion in 0..=100 for a `Progress` event with a known total.
    pub fn percent(&self) -> Option<f32> {
        match *self {
            LoadEvent::Progress { loaded, total: Some(total) } => {
                if total == 0 {
                    Some(100.0)
                } else {
                    Some((loaded as f64 / total as f64 * 100.0).clamp(0.0, 100.0) as f32)
                }
            }
            _ => None,
        }
    }

    /// `Loaded` and `Failed` end a load.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoadEvent::Progress { .. })
    }
}
