//! Scoped change of the process working directory.

use std::path::{Path, PathBuf};

use crate::error::{io_err, DaemonError};

/// Changes the working directory on [`WorkdirGuard::enter`] and restores the
/// previous one when dropped, whether the scope ends normally, through `?`,
/// or by unwinding.
#[derive(Debug)]
pub struct WorkdirGuard {
    previous: PathBuf,
}

impl WorkdirGuard {
    pub fn enter(dir: &Path) -> Result<Self, DaemonError> {
        let previous = std::env::current_dir().map_err(|e| io_err("current directory", e))?;
        std::env::set_current_dir(dir).map_err(|e| io_err(dir, e))?;
        Ok(Self { previous })
    }

    /// Directory that will be restored on drop.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(err) = std::env::set_current_dir(&self.previous) {
            tracing::error!(
                path = %self.previous.display(),
                error = %err,
                "failed to restore working directory",
            );
        }
    }
}
