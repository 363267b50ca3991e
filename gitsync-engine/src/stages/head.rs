//! Local vs. remote head comparison.

use crate::error::SyncError;
use crate::executor::CommandExecutor;
use crate::git::Git;

/// `true` when the remote's advertised `HEAD` differs from the local `HEAD`.
///
/// If either revision cannot be resolved (empty output) the answer is
/// `false`: an unknown revision must never lead to a hard reset. Command
/// failures are returned to the caller.
pub fn is_divergent<E: CommandExecutor>(git: &Git<E>, remote: &str) -> Result<bool, SyncError> {
    let remote_head = git.ls_remote_head(remote)?;
    let local_head = git.rev_parse_head()?;

    match (remote_head, local_head) {
        (Some(remote_head), Some(local_head)) => {
            tracing::debug!("remote_head: {remote_head} local_head: {local_head}");
            Ok(remote_head != local_head)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::CommandOutput;
    use crate::testing::ScriptedExecutor;

    fn git_with(remote: &[&str], local: &[&str]) -> Git<ScriptedExecutor> {
        let exec = ScriptedExecutor::new()
            .on(&["ls-remote"], CommandOutput::success(remote.to_vec()))
            .on(&["rev-parse"], CommandOutput::success(local.to_vec()));
        Git::with_executor(exec, true)
    }

    #[test]
    fn equal_heads_are_not_divergent() {
        let git = git_with(&["abc123\tHEAD"], &["abc123"]);
        assert!(!is_divergent(&git, "origin").expect("check"));
    }

    #[test]
    fn different_heads_are_divergent() {
        let git = git_with(&["def456\tHEAD"], &["abc123"]);
        assert!(is_divergent(&git, "origin").expect("check"));
    }

    #[test]
    fn empty_remote_is_not_divergent() {
        let git = git_with(&[], &["abc123"]);
        assert!(!is_divergent(&git, "origin").expect("check"));
    }

    #[test]
    fn empty_local_is_not_divergent() {
        let git = git_with(&["def456\tHEAD"], &[]);
        assert!(!is_divergent(&git, "origin").expect("check"));
    }

    #[test]
    fn comparison_is_exact_string_match() {
        let git = git_with(&["ABC123\tHEAD"], &["abc123"]);
        assert!(is_divergent(&git, "origin").expect("check"));
    }

    #[test]
    fn command_failure_propagates() {
        let exec = ScriptedExecutor::new()
            .on(&["ls-remote"], CommandOutput::failure(128, "could not read from remote"));
        let git = Git::with_executor(exec, true);
        assert!(is_divergent(&git, "origin").is_err());
    }
}
