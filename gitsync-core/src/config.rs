//! Configuration document persistence and the merged runtime [`SyncConfig`].
//!
//! # API pattern
//!
//! - [`load_document`] / [`save_document`] take an explicit path; the CLI
//!   resolves it from `--file` or [`default_config_path`].
//! - [`SyncConfig::from_document`] is pure; the host name is passed in so
//!   tests never depend on the machine they run on.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sysinfo::System;

use crate::error::{io_err, ConfigError};
use crate::types::{ConfigDocument, LogLevel, Overrides, RepositoryDescriptor};

/// File name looked up next to the executable when `--file` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Host name used when the operating system does not report one.
pub const FALLBACK_HOST_NAME: &str = "localhost";

// ---------------------------------------------------------------------------
// 1. Runtime configuration
// ---------------------------------------------------------------------------

/// Immutable configuration for one run, merged from the document and the
/// command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub repositories: Vec<RepositoryDescriptor>,
    pub gc_enabled: bool,
    pub loop_enabled: bool,
    pub sleep_interval: Duration,
    pub local_host_name: String,
    pub log_level: LogLevel,
}

impl SyncConfig {
    /// Merge `overrides` over `doc`.
    ///
    /// A looping run with a zero interval is rejected with
    /// [`ConfigError::Invalid`].
    pub fn from_document(
        doc: ConfigDocument,
        overrides: &Overrides,
        local_host_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let loop_enabled = overrides.loop_enabled.unwrap_or(doc.loop_enabled);
        let sleep = overrides.sleep.unwrap_or(doc.sleep);
        if loop_enabled && sleep == 0 {
            return Err(ConfigError::Invalid(
                "sleep must be at least 1 second when loop is enabled".to_string(),
            ));
        }

        Ok(Self {
            repositories: doc.repositories,
            gc_enabled: overrides.gc.unwrap_or(doc.gc),
            loop_enabled,
            sleep_interval: Duration::from_secs(sleep),
            local_host_name: local_host_name.into(),
            log_level: doc.loglevel,
        })
    }

    /// Whether git should be asked for `--quiet` output.
    pub fn quiet(&self) -> bool {
        !self.log_level.is_verbose()
    }
}

// ---------------------------------------------------------------------------
// 2. Load / save
// ---------------------------------------------------------------------------

/// Load the document at `path`.
///
/// A missing file yields [`ConfigDocument::default`]; malformed YAML yields
/// [`ConfigError::Parse`] with the path attached.
pub fn load_document(path: &Path) -> Result<ConfigDocument, ConfigError> {
    if !path.exists() {
        return Ok(ConfigDocument::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(ConfigDocument::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Atomically write `doc` to `path`.
///
/// Write flow: serialize → `<file>.tmp` sibling → `rename`. The parent
/// directory is created if needed.
pub fn save_document(path: &Path, doc: &ConfigDocument) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    let yaml = serde_yaml::to_string(doc)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// 3. Environment lookups
// ---------------------------------------------------------------------------

/// `config.yml` in the directory holding the running executable.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(|e| io_err("current executable", e))?;
    let dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(dir.join(DEFAULT_CONFIG_FILE))
}

/// The host's network name, resolved once per run.
pub fn resolve_host_name() -> String {
    System::host_name()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_HOST_NAME.to_string())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn overrides_win_over_document() {
        let doc = ConfigDocument {
            gc: false,
            loop_enabled: false,
            sleep: 60,
            ..ConfigDocument::default()
        };
        let overrides = Overrides {
            gc: Some(true),
            loop_enabled: Some(true),
            sleep: Some(5),
        };
        let config = SyncConfig::from_document(doc, &overrides, "worker-1").expect("merge");
        assert!(config.gc_enabled);
        assert!(config.loop_enabled);
        assert_eq!(config.sleep_interval, Duration::from_secs(5));
        assert_eq!(config.local_host_name, "worker-1");
    }

    #[test]
    fn document_values_kept_without_overrides() {
        let doc = ConfigDocument {
            gc: true,
            sleep: 300,
            ..ConfigDocument::default()
        };
        let config =
            SyncConfig::from_document(doc, &Overrides::default(), "worker-1").expect("merge");
        assert!(config.gc_enabled);
        assert!(!config.loop_enabled);
        assert_eq!(config.sleep_interval, Duration::from_secs(300));
    }

    #[test]
    fn zero_sleep_rejected_only_when_looping() {
        let doc = ConfigDocument {
            sleep: 0,
            ..ConfigDocument::default()
        };
        assert!(SyncConfig::from_document(doc.clone(), &Overrides::default(), "h").is_ok());

        let looping = Overrides {
            loop_enabled: Some(true),
            ..Overrides::default()
        };
        let err = SyncConfig::from_document(doc, &looping, "h").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn quiet_unless_debug() {
        let mut config =
            SyncConfig::from_document(ConfigDocument::default(), &Overrides::default(), "h")
                .expect("merge");
        assert!(config.quiet());
        config.log_level = LogLevel::Debug;
        assert!(!config.quiet());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let doc = load_document(&dir.path().join("absent.yml")).expect("load");
        assert_eq!(doc, ConfigDocument::default());
    }

    #[test]
    fn empty_file_loads_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "\n").expect("write");
        assert_eq!(load_document(&path).expect("load"), ConfigDocument::default());
    }

    #[test]
    fn save_cleans_up_tmp() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.yml");
        save_document(&path, &ConfigDocument::default()).expect("save");
        assert!(path.exists());
        assert!(!dir.path().join("config.yml.tmp").exists());
    }

    #[test]
    fn host_name_is_never_empty() {
        assert!(!resolve_host_name().is_empty());
    }
}
