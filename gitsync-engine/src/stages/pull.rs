//! Pull stage.

use gitsync_core::{RepositoryDescriptor, DEFAULT_REMOTE};

use crate::error::SyncError;
use crate::executor::CommandExecutor;
use crate::git::Git;
use crate::stages::head::is_divergent;

/// Bring the working copy up to the remote when the heads differ.
///
/// Returns `Ok(true)` when a reset and pull were both issued, `Ok(false)`
/// when the heads already agree.
///
/// NOTE: the hard reset runs before the commit stage, so uncommitted local
/// edits are discarded whenever the remote has moved. This ordering is kept
/// as-is and is covered by `divergence_discards_uncommitted_edits_first`.
pub fn pull<E: CommandExecutor>(
    git: &Git<E>,
    repo: &RepositoryDescriptor,
) -> Result<bool, SyncError> {
    if !is_divergent(git, DEFAULT_REMOTE)? {
        return Ok(false);
    }

    tracing::info!("Pull from central repository");
    git.reset_hard_head()?;
    git.pull(DEFAULT_REMOTE, &repo.branch)?;
    Ok(true)
}
