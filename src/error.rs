use crate::command::ExitCode;
use crate::dispatcher::Mode;
use std::io;
use thiserror::Error;

/// Why a compile or run request could not be carried out.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("not a valid file type {kind:?} to {mode}\n[Supported] {}", .mode.supported())]
    UnsupportedFileType { kind: String, mode: Mode },

    #[error(transparent)]
    ExternalProcessFailure(#[from] ProcessError),
}

impl DispatchError {
    /// Exit code reported by the failed child, if it got far enough to exit.
    pub fn child_exit_code(&self) -> Option<ExitCode> {
        match self {
            Self::ExternalProcessFailure(ProcessError::Exited { code, .. }) => Some(*code),
            _ => None,
        }
    }
}

/// Failure of a single external program.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("command not found: {program}")]
    NotFound { program: String },

    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program}: exit status {code}")]
    Exited { program: String, code: ExitCode },
}
