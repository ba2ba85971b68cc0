//! Error types for seqflow.

use thiserror::Error;

/// Result type alias using seqflow's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The transformation function of a stage panicked while relaying.
    #[error("stage '{stage}' panicked: {message}")]
    StagePanicked { stage: String, message: String },

    /// A worker thread terminated without reporting its outcome.
    #[error("worker '{worker}' was lost before reporting completion")]
    WorkerLost { worker: String },

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker '{worker}': {source}")]
    Spawn {
        worker: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid value for config field '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },
}

impl Error {
    pub fn config_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the stage or worker this error originated from, if any.
    pub fn worker(&self) -> Option<&str> {
        match self {
            Self::StagePanicked { stage, .. } => Some(stage),
            Self::WorkerLost { worker } | Self::Spawn { worker, .. } => Some(worker),
            _ => None,
        }
    }
}

/// Renders a panic payload as text. Payloads from `panic!` are either
/// `&'static str` or `String`; anything else gets a placeholder.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
