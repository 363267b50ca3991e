//! One synchronization cycle for one repository.
//!
//! ## Cycle
//!
//! 1. pull (failures recovered as "not pulled")
//! 2. commit local changes (failures propagate)
//! 3. push if committed (failures recovered)
//! 4. advance the rolling counter when something changed
//! 5. gc when enabled globally or forced by the counter (failures propagate)
//!
//! The engine keeps no state between cycles; the caller owns the counter.

use gitsync_core::{RepositoryDescriptor, SyncConfig};

use crate::error::SyncError;
use crate::executor::{CommandExecutor, ProcessExecutor};
use crate::git::Git;
use crate::stages;

/// Name written into automatic commit messages.
pub const TOOL_NAME: &str = "gitsync";

/// Highest counter value; the next changing cycle wraps to 0 and forces gc.
pub const MAX_CONSECUTIVE_CYCLES: u32 = 10;

/// What happened to a repository during one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleResult {
    pub pulled: bool,
    pub committed: bool,
}

impl CycleResult {
    pub fn changed(&self) -> bool {
        self.pulled || self.committed
    }
}

/// Result of [`SyncEngine::run_cycle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Counter value to store for the next cycle.
    pub count: u32,
    pub result: CycleResult,
    /// Whether gc was forced by the counter this cycle.
    pub forced_gc: bool,
}

/// Advance the rolling counter.
///
/// Returns the new count and whether maintenance is forced. Without a change
/// the count is returned untouched.
pub fn advance_counter(prior: u32, changed: bool) -> (u32, bool) {
    if !changed {
        return (prior, false);
    }
    let count = if prior >= MAX_CONSECUTIVE_CYCLES {
        0
    } else {
        prior + 1
    };
    (count, count == 0)
}

/// Settings the engine needs from [`SyncConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub gc_enabled: bool,
    pub quiet: bool,
    pub tool_name: String,
    pub host_name: String,
}

impl EngineSettings {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            gc_enabled: config.gc_enabled,
            quiet: config.quiet(),
            tool_name: TOOL_NAME.to_string(),
            host_name: config.local_host_name.clone(),
        }
    }
}

/// Orchestrates the stages for one repository at a time.
pub struct SyncEngine<E = ProcessExecutor> {
    git: Git<E>,
    settings: EngineSettings,
}

impl SyncEngine<ProcessExecutor> {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_executor(ProcessExecutor, settings)
    }
}

impl<E: CommandExecutor> SyncEngine<E> {
    pub fn with_executor(executor: E, settings: EngineSettings) -> Self {
        Self {
            git: Git::with_executor(executor, settings.quiet),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Run one cycle in the current working directory.
    pub fn run_cycle(
        &self,
        repo: &RepositoryDescriptor,
        prior_count: u32,
    ) -> Result<CycleOutcome, SyncError> {
        let pulled = match stages::pull(&self.git, repo) {
            Ok(pulled) => pulled,
            Err(err) => {
                tracing::warn!("Could not sync from central repository: {err}");
                false
            }
        };

        let committed = stages::commit_local_changes(
            &self.git,
            &self.settings.tool_name,
            &self.settings.host_name,
        )?;

        if let Err(err) = stages::push(&self.git, repo, committed) {
            tracing::warn!("Could not sync to central repository: {err}");
        }

        let result = CycleResult { pulled, committed };
        let (count, forced_gc) = advance_counter(prior_count, result.changed());

        stages::maybe_gc(&self.git, self.settings.gc_enabled, forced_gc)?;

        Ok(CycleOutcome {
            count,
            result,
            forced_gc,
        })
    }
}
