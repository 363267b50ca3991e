//! The four stages of a synchronization cycle, plus the divergence check.
//!
//! Every stage returns a `Result`; whether a failure is recovered or
//! propagated is decided by the caller in [`crate::engine`].

pub mod commit;
pub mod head;
pub mod maintenance;
pub mod pull;
pub mod push;

pub use commit::{commit_local_changes, commit_message};
pub use head::is_divergent;
pub use maintenance::maybe_gc;
pub use pull::pull;
pub use push::push;
