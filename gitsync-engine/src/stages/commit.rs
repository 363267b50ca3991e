//! Local commit stage.

use crate::error::SyncError;
use crate::executor::CommandExecutor;
use crate::git::Git;
use crate::status::{parse_status, StatusCode, StatusSummary};

/// Commit message recorded for an automatic commit.
pub fn commit_message(changed: usize, tool_name: &str, host_name: &str) -> String {
    format!("Commited {changed} files by {tool_name} of {host_name}")
}

/// Stage and commit local changes.
///
/// Untracked files trigger `git add .`; any recognized change triggers
/// `git commit -a`. Returns whether a commit was made.
pub fn commit_local_changes<E: CommandExecutor>(
    git: &Git<E>,
    tool_name: &str,
    host_name: &str,
) -> Result<bool, SyncError> {
    let entries = parse_status(&git.status_short()?);
    for entry in &entries {
        match &entry.code {
            StatusCode::Unrecognized(code) => {
                tracing::debug!("Ignored status {code}: {}", entry.path)
            }
            code => tracing::debug!("{code}: {}", entry.path),
        }
    }

    let summary = StatusSummary::from_entries(&entries);

    if summary.untracked > 0 {
        tracing::info!("Added to the local repository");
        git.add_all()?;
    }

    if summary.changed == 0 {
        return Ok(false);
    }

    tracing::info!("Commit to the local repository");
    tracing::info!("Commited {} files", summary.changed);
    git.commit_all(&commit_message(summary.changed, tool_name, host_name))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::CommandOutput;
    use crate::testing::ScriptedExecutor;

    fn git_with_status(lines: &[&str]) -> (Git<ScriptedExecutor>, ScriptedExecutor) {
        let exec =
            ScriptedExecutor::new().on(&["status"], CommandOutput::success(lines.to_vec()));
        (Git::with_executor(exec.clone(), true), exec)
    }

    #[test]
    fn message_format() {
        assert_eq!(
            commit_message(3, "gitsync", "worker-1"),
            "Commited 3 files by gitsync of worker-1"
        );
    }

    #[test]
    fn modified_only_commits_without_staging() {
        let (git, exec) = git_with_status(&[" M a.md", " M b.md"]);
        assert!(commit_local_changes(&git, "gitsync", "worker-1").expect("commit"));
        assert_eq!(
            exec.commands(),
            vec![
                "status --short",
                "commit -a -m Commited 2 files by gitsync of worker-1"
            ]
        );
    }

    #[test]
    fn untracked_files_are_staged_then_committed() {
        let (git, exec) = git_with_status(&["?? new.md", " D old.md"]);
        assert!(commit_local_changes(&git, "gitsync", "worker-1").expect("commit"));
        assert_eq!(
            exec.commands()[1..],
            ["add .", "commit -a -m Commited 2 files by gitsync of worker-1"]
        );
    }

    #[test]
    fn clean_tree_does_nothing() {
        let (git, exec) = git_with_status(&[]);
        assert!(!commit_local_changes(&git, "gitsync", "worker-1").expect("commit"));
        assert_eq!(exec.commands(), vec!["status --short"]);
    }

    #[test]
    fn unrecognized_codes_are_not_counted() {
        let (git, exec) = git_with_status(&["MM both.rs", "UU conflict.rs"]);
        assert!(!commit_local_changes(&git, "gitsync", "worker-1").expect("commit"));
        assert_eq!(exec.commands(), vec!["status --short"]);
    }

    #[test]
    fn commit_failure_propagates() {
        let exec = ScriptedExecutor::new()
            .on(&["status"], CommandOutput::success([" M a.md"]))
            .on(&["commit"], CommandOutput::failure(1, "nothing added"));
        let git = Git::with_executor(exec, true);
        assert!(commit_local_changes(&git, "gitsync", "worker-1").is_err());
    }
}
