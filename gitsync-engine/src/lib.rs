//! # gitsync-engine
//!
//! Per-repository synchronization cycle on top of the git command line.
//!
//! Call [`SyncEngine::run_cycle`] with the working directory set to the
//! repository. Use [`bootstrap::bootstrap`] to clone and register a new one.

pub mod bootstrap;
pub mod engine;
pub mod error;
pub mod executor;
pub mod git;
pub mod stages;
pub mod status;

#[cfg(any(test, feature = "test-harness"))]
pub mod testing;

pub use engine::{
    advance_counter, CycleOutcome, CycleResult, EngineSettings, SyncEngine,
    MAX_CONSECUTIVE_CYCLES, TOOL_NAME,
};
pub use error::SyncError;
pub use executor::{CommandExecutor, CommandOutput, ProcessExecutor};
pub use git::Git;
