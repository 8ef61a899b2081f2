//! Errors surfaced by the session and the command log.
use std::path::PathBuf;

use thiserror::Error;

use chegg_core::{CommandError, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("command log I/O failed")]
    Io(#[from] std::io::Error),

    #[error("command log {} already exists", .0.display())]
    LogAlreadyExists(PathBuf),

    #[error("command log line {line} is malformed")]
    MalformedLog {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("command log does not start with a match header")]
    MissingHeader,

    #[error("command log line {line} repeats the match header")]
    DuplicateHeader { line: usize },

    #[error("failed to encode log record")]
    Encode(#[source] serde_json::Error),

    #[error("match could not be started")]
    Start(#[source] CommandError),

    #[error("replayed command #{index} was refused")]
    Replay {
        index: usize,
        #[source]
        source: CommandError,
    },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Start(err) | Self::Replay { source: err, .. } => err.severity(),
            Self::MalformedLog { .. } | Self::MissingHeader | Self::DuplicateHeader { .. } => {
                ErrorSeverity::Validation
            }
            Self::Io(_) | Self::LogAlreadyExists(_) | Self::Encode(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "RUNTIME_IO",
            Self::LogAlreadyExists(_) => "RUNTIME_LOG_EXISTS",
            Self::MalformedLog { .. } => "RUNTIME_LOG_MALFORMED",
            Self::MissingHeader => "RUNTIME_LOG_MISSING_HEADER",
            Self::DuplicateHeader { .. } => "RUNTIME_LOG_DUPLICATE_HEADER",
            Self::Encode(_) => "RUNTIME_ENCODE",
            Self::Start(_) => "RUNTIME_START_REFUSED",
            Self::Replay { .. } => "RUNTIME_REPLAY_REFUSED",
        }
    }
}
