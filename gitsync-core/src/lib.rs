//! gitsync core library: configuration types, document persistence, errors.
//!
//! - [`types`]: repository entries and the YAML document
//! - [`config`]: load / save / merge into [`SyncConfig`]
//! - [`remote`]: remote URL construction for bootstrap
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod remote;
pub mod types;

pub use config::SyncConfig;
pub use error::ConfigError;
pub use remote::RemoteSpec;
pub use types::{
    ConfigDocument, LogLevel, Overrides, RepositoryDescriptor, DEFAULT_BRANCH, DEFAULT_REMOTE,
};
