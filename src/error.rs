use std::path::PathBuf;

use thiserror::Error;

/// Exit status for argument errors and folder resolution failures.
pub const EXIT_USAGE: i32 = 2;

/// Fatal errors raised while resolving the input and output folders.
///
/// Every variant maps to exit status [`EXIT_USAGE`]; anything else that goes
/// wrong during a run is an `anyhow::Error` and exits with status 1.
#[derive(Debug, Error)]
pub enum AckError {
    #[error("Input folder could not be detected, please specify it with -i or --input")]
    MissingInput,

    #[error("Input folder {} doesn't exist or is not a folder", path.display())]
    InvalidInput { path: PathBuf },

    #[error("Output folder could not be detected, please specify it with -o or --output")]
    MissingOutput,

    #[error("Output folder {} doesn't exist or is not a folder", path.display())]
    InvalidOutput { path: PathBuf },
}

impl AckError {
    pub fn exit_code(&self) -> i32 {
        EXIT_USAGE
    }
}
