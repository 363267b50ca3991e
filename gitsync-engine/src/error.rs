//! Error types for gitsync-engine.

use thiserror::Error;

use gitsync_core::ConfigError;

/// All errors that can arise from running a synchronization cycle.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The command could not be started at all (binary missing, permission denied, ...).
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited unsuccessfully.
    #[error("`{command}` {}{}", describe_status(.status), stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        /// Exit status; `None` when the process was terminated by a signal.
        status: Option<i32>,
        stderr: String,
    },

    /// Configuration error raised while bootstrapping a repository.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SyncError {
    /// Exit status of a failed command, if this is a command failure.
    pub fn status(&self) -> Option<i32> {
        match self {
            SyncError::CommandFailed { status, .. } => *status,
            _ => None,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
