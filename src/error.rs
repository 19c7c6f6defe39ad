use std::io;
use std::time::Duration;

use thiserror::Error;

/// The external validator could not be run to completion.
///
/// Kept apart from [`crate::ValidationReport`]: a file that fails validation is
/// a successful run, these are not.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to launch validator '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("I/O error while running validator '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("validator '{program}' did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

impl ExecutionError {
    pub(crate) fn launch(program: &str, source: io::Error) -> Self {
        Self::Launch {
            program: program.to_string(),
            source,
        }
    }

    pub(crate) fn io(program: &str, source: io::Error) -> Self {
        Self::Io {
            program: program.to_string(),
            source,
        }
    }
}
