use hl_engine::logging::codes::{self, Code};
use hl_engine::HighlightError;
use std::path::PathBuf;

/// CLI processing errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Input path does not exist: {path}")]
    MissingInput { path: PathBuf },

    #[error("Tokenization failed: {0}")]
    Highlight(#[from] HighlightError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker thread failed while processing {path}")]
    WorkerFailed { path: PathBuf },
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::Highlight(err) => err.error_code(),
            Self::Io { .. } | Self::Walk { .. } | Self::MissingInput { .. } => {
                codes::system::FILE_ACCESS_ERROR
            }
            Self::Json(_) | Self::WorkerFailed { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}
