//! Push stage.

use gitsync_core::{RepositoryDescriptor, DEFAULT_REMOTE};

use crate::error::SyncError;
use crate::executor::CommandExecutor;
use crate::git::Git;

/// Push the branch when this cycle committed something.
///
/// Returns whether a push was issued.
pub fn push<E: CommandExecutor>(
    git: &Git<E>,
    repo: &RepositoryDescriptor,
    committed: bool,
) -> Result<bool, SyncError> {
    if !committed {
        tracing::info!("There is no change in local");
        return Ok(false);
    }

    tracing::info!("Push to the central repository");
    git.push(DEFAULT_REMOTE, &repo.branch)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedExecutor;

    fn repo() -> RepositoryDescriptor {
        RepositoryDescriptor::new("/srv/notes", "ssh://central/notes.git")
    }

    #[test]
    fn nothing_committed_issues_no_command() {
        let exec = ScriptedExecutor::new();
        let git = Git::with_executor(exec.clone(), true);
        assert!(!push(&git, &repo(), false).expect("push"));
        assert!(exec.commands().is_empty());
    }

    #[test]
    fn committed_issues_exactly_one_push() {
        let exec = ScriptedExecutor::new();
        let git = Git::with_executor(exec.clone(), true);
        assert!(push(&git, &repo(), true).expect("push"));
        assert_eq!(exec.commands(), vec!["push --quiet origin master"]);
    }
}
