use std::{io, process::ExitStatus, time::Duration};
use thiserror::Error;

pub type Result<T> = ::core::result::Result<T, ScanimageError>;

#[derive(Debug, Error)]
pub enum ScanimageError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("process exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("process terminated by signal")]
    Terminated,

    #[error("process did not finish in {0:?}")]
    Timeout(Duration),

    #[error("error occurred while communicating with the process: {0}")]
    IO(#[from] io::Error),
}
