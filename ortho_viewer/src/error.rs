//! Error types for the ortho viewer
//!
//! This module defines the error types used throughout the viewer,
//! including framing, viewport, asset loading, and configuration errors.

use std::fmt;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Viewer errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Initialization failed (scene manager, renderer, subsystems)
    InitializationFailed(String),

    /// Viewport size or aspect ratio cannot produce a valid frustum
    InvalidViewport(String),

    /// Bounding volume has zero extent or non-finite corners
    DegenerateBounds(String),

    /// The model asset could not be loaded
    AssetLoadFailed {
        /// Path handed to the loader
        path: String,
        /// Loader-reported reason
        reason: String,
    },

    /// Viewer configuration could not be read or parsed
    ConfigError(String),

    /// Rendering collaborator error
    BackendError(String),

    /// I/O error (message only, so the error stays cloneable)
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidViewport(msg) => write!(f, "Invalid viewport: {}", msg),
            Error::DegenerateBounds(msg) => write!(f, "Degenerate bounds: {}", msg),
            Error::AssetLoadFailed { path, reason } => {
                write!(f, "Failed to load asset '{}': {}", path, reason)
            }
            Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

// ===== ERROR MACROS =====

/// Log an error with file:line information and evaluate to the matching `Error`
///
/// The second argument names a `String`-carrying `Error` variant.
///
/// # Example
///
/// ```no_run
/// # use ortho_viewer::viewer_err;
/// let err = viewer_err!("viewer::AutoFramer", DegenerateBounds, "max dimension is {}", 0.0);
/// ```
#[macro_export]
macro_rules! viewer_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::viewer::Engine::log_detailed(
            $crate::viewer::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::viewer::Error::$kind(message)
    }};
}

/// Log an error with file:line information and return it from the current function
#[macro_export]
macro_rules! viewer_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::viewer_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
