use core::time::Duration;
use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NodeError {
    #[error("daemon executable not found at `{path}`")]
    ExecutableNotFound { path: Utf8PathBuf },

    /// The daemon ran and exited non-zero.
    #[error("`{command}` failed with exit status {status:?}: {output}")]
    CommandFailed {
        command: String,
        /// Exit code, `None` when terminated by a signal.
        status: Option<i32>,
        output: String,
    },

    #[error("`{command}` timed out after {after:?}")]
    Timeout { command: String, after: Duration },

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("unexpected output from `{command}`: {reason}")]
    InvalidOutput { command: String, reason: String },
}
