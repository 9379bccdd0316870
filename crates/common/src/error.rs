//! Error types shared across Reelforge crates.
//!
//! Only render-pass-fatal conditions are modeled here. Recoverable anomalies
//! (a clip that fails to decode, a duration sum slightly off the declared
//! total) are absorbed by their components and surface through tracing only.

use std::path::PathBuf;

/// Top-level error type for Reelforge operations.
#[derive(Debug, thiserror::Error)]
pub enum ReelforgeError {
    /// A required still image could not be decoded. Fatal for the render pass.
    #[error("Asset load error: {message}")]
    AssetLoad { message: String },

    /// The edit plan violates a structural invariant (bad scene index,
    /// non-positive duration). The render pass must not start.
    #[error("Composition error: {message}")]
    Composition { message: String },

    /// The capture pipeline errored after it had started.
    #[error("Capture error: {message}")]
    Capture { message: String },

    /// The capture pipeline could not be brought up at all.
    #[error("Capture pipeline never started: {message}")]
    CaptureNeverStarted { message: String },

    /// Capture finalized but the output artifact contains zero bytes.
    #[error("Capture produced an empty artifact: {path}")]
    EmptyArtifact { path: PathBuf },

    #[error("Render error: {message}")]
    Render { message: String },

    /// ffprobe failed or returned unusable media metadata.
    #[error("Probe error: {message}")]
    Probe { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    /// The render pass was aborted by the caller.
    #[error("Render pass cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ReelforgeError.
pub type ReelforgeResult<T> = Result<T, ReelforgeError>;

impl ReelforgeError {
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad {
            message: msg.into(),
        }
    }

    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition {
            message: msg.into(),
        }
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether this error means the render pass never began producing output.
    pub fn is_pre_capture(&self) -> bool {
        matches!(
            self,
            Self::AssetLoad { .. }
                | Self::Composition { .. }
                | Self::CaptureNeverStarted { .. }
                | Self::Probe { .. }
                | Self::Config { .. }
                | Self::FileNotFound { .. }
        )
    }
}
