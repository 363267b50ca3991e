//! Maintenance (garbage collection) stage.

use crate::error::SyncError;
use crate::executor::CommandExecutor;
use crate::git::Git;

/// Run `git gc` when enabled globally or forced by the cycle counter.
///
/// Returns whether gc ran.
pub fn maybe_gc<E: CommandExecutor>(
    git: &Git<E>,
    global_enabled: bool,
    forced: bool,
) -> Result<bool, SyncError> {
    if !(global_enabled || forced) {
        return Ok(false);
    }
    tracing::info!("garbage collect");
    git.gc()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::CommandOutput;
    use crate::testing::ScriptedExecutor;

    #[test]
    fn runs_when_enabled_or_forced() {
        for (enabled, forced, expected) in [
            (false, false, false),
            (true, false, true),
            (false, true, true),
            (true, true, true),
        ] {
            let exec = ScriptedExecutor::new();
            let git = Git::with_executor(exec.clone(), true);
            assert_eq!(maybe_gc(&git, enabled, forced).expect("gc"), expected);
            assert_eq!(exec.commands().len(), usize::from(expected));
        }
    }

    #[test]
    fn gc_failure_propagates() {
        let exec = ScriptedExecutor::new().on(&["gc"], CommandOutput::failure(1, "corrupt"));
        let git = Git::with_executor(exec, true);
        assert!(maybe_gc(&git, true, false).is_err());
    }
}
