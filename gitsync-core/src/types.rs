//! Domain types for the gitsync configuration document.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! The document types are serializable/deserializable via serde + serde_yaml.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Remote name every tracked repository pulls from and pushes to.
pub const DEFAULT_REMOTE: &str = "origin";

/// Branch used when a repository entry does not name one.
pub const DEFAULT_BRANCH: &str = "master";

/// Seconds between passes when the document does not set `sleep`.
pub const DEFAULT_SLEEP_SECS: u64 = 60;

// ---------------------------------------------------------------------------
// Repository entries
// ---------------------------------------------------------------------------

/// One tracked working copy. Identity is `local_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Path to the working copy on disk.
    pub local_path: PathBuf,
    /// Remote URL the working copy was cloned from.
    #[serde(rename = "url", default)]
    pub remote_url: String,
    /// Branch pulled from and pushed to on [`DEFAULT_REMOTE`].
    #[serde(default = "default_branch", skip_serializing_if = "is_default_branch")]
    pub branch: String,
}

impl RepositoryDescriptor {
    pub fn new(local_path: impl Into<PathBuf>, remote_url: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            remote_url: remote_url.into(),
            branch: default_branch(),
        }
    }
}

impl fmt::Display for RepositoryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.local_path.display().fmt(f)
    }
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_owned()
}

fn is_default_branch(branch: &str) -> bool {
    branch == DEFAULT_BRANCH
}

// ---------------------------------------------------------------------------
// Log level
// ---------------------------------------------------------------------------

/// Verbosity requested by the `loglevel` key.
///
/// Accepts level names (`"debug"`, `"info"`, ...) as well as the numeric
/// severities older configuration files carry (`0` = debug, `1` = info,
/// `2` = warn, `3` and above = error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "RawLogLevel")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// `true` for the levels that want full command output.
    pub fn is_verbose(&self) -> bool {
        matches!(self, LogLevel::Trace | LogLevel::Debug)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLogLevel {
    Name(String),
    Severity(u64),
}

impl TryFrom<RawLogLevel> for LogLevel {
    type Error = String;

    fn try_from(raw: RawLogLevel) -> Result<Self, String> {
        match raw {
            RawLogLevel::Name(name) => match name.to_ascii_lowercase().as_str() {
                "trace" => Ok(LogLevel::Trace),
                "debug" => Ok(LogLevel::Debug),
                "info" => Ok(LogLevel::Info),
                "warn" | "warning" => Ok(LogLevel::Warn),
                "error" | "fatal" => Ok(LogLevel::Error),
                other => Err(format!(
                    "unknown log level '{other}'; expected: trace, debug, info, warn, error"
                )),
            },
            RawLogLevel::Severity(0) => Ok(LogLevel::Debug),
            RawLogLevel::Severity(1) => Ok(LogLevel::Info),
            RawLogLevel::Severity(2) => Ok(LogLevel::Warn),
            RawLogLevel::Severity(_) => Ok(LogLevel::Error),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration document
// ---------------------------------------------------------------------------

/// Serde mirror of the YAML configuration file.
///
/// Unknown keys (including a stale `local_host`) are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub repositories: Vec<RepositoryDescriptor>,
    #[serde(default)]
    pub gc: bool,
    #[serde(rename = "loop", default)]
    pub loop_enabled: bool,
    #[serde(default = "default_sleep")]
    pub sleep: u64,
    #[serde(default)]
    pub loglevel: LogLevel,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            repositories: vec![],
            gc: false,
            loop_enabled: false,
            sleep: DEFAULT_SLEEP_SECS,
            loglevel: LogLevel::default(),
        }
    }
}

fn default_sleep() -> u64 {
    DEFAULT_SLEEP_SECS
}

/// Values given on the command line; `Some` wins over the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub gc: Option<bool>,
    pub loop_enabled: Option<bool>,
    pub sleep: Option<u64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
