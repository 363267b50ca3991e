//! Scheduler runtime: repeated synchronization passes, signal handling, logging.

mod error;
mod runtime;
pub mod workdir;

pub use error::DaemonError;
pub use runtime::{
    init_tracing, run, start_blocking, CycleStates, RepositoryCycleState, RunOutcome, Scheduler,
};
pub use workdir::WorkdirGuard;
