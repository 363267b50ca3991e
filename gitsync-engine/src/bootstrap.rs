//! One-time `--init` flow: clone a remote and start tracking it.

use std::path::Path;

use gitsync_core::{config, ConfigError, RemoteSpec, RepositoryDescriptor};

use crate::error::SyncError;
use crate::executor::CommandExecutor;
use crate::git::Git;

/// Clone the remote described by `spec` into `local_path` and append it to
/// the document at `config_path`.
///
/// The document is read before cloning so a malformed file or an already
/// tracked `local_path` is reported without touching the filesystem.
pub fn bootstrap<E: CommandExecutor>(
    git: &Git<E>,
    config_path: &Path,
    spec: &RemoteSpec,
    local_path: &Path,
) -> Result<RepositoryDescriptor, SyncError> {
    if local_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("--local_path is required for --init".into()).into());
    }
    let url = spec.url()?;

    let mut doc = config::load_document(config_path)?;
    if doc.repositories.iter().any(|r| r.local_path == local_path) {
        return Err(ConfigError::Invalid(format!(
            "{} is already tracked in {}",
            local_path.display(),
            config_path.display()
        ))
        .into());
    }

    tracing::info!(
        "init local repository {} from url is {url}",
        local_path.display()
    );
    git.clone_into(&url, &local_path.to_string_lossy())?;

    let descriptor = RepositoryDescriptor::new(local_path, url);
    doc.repositories.push(descriptor.clone());
    config::save_document(config_path, &doc)?;
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::CommandOutput;
    use crate::testing::ScriptedExecutor;
    use tempfile::TempDir;

    fn ssh_spec() -> RemoteSpec {
        RemoteSpec {
            protocol: Some("ssh".into()),
            remote_user: Some("git".into()),
            remote_host: Some("central".into()),
            remote_path: Some("srv/notes.git".into()),
            remote_port: None,
        }
    }

    #[test]
    fn clones_and_appends_repository() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = TempDir::new().expect("tempdir");
        let config_path = dir.path().join("config.yml");
        std::fs::write(&config_path, "gc: true\nrepositories:\n  - local_path: /srv/a\n    url: file:///a\n")
            .expect("seed");

        let exec = ScriptedExecutor::new();
        let git = Git::with_executor(exec.clone(), true);
        let added = bootstrap(&git, &config_path, &ssh_spec(), Path::new("/srv/notes")).expect("init");

        assert_eq!(added.remote_url, "ssh://git@central/srv/notes.git");
        assert_eq!(
            exec.commands(),
            vec!["clone --quiet ssh://git@central/srv/notes.git /srv/notes"]
        );

        let doc = config::load_document(&config_path).expect("reload");
        assert!(doc.gc, "existing keys survive the rewrite");
        assert_eq!(doc.repositories.len(), 2);
        assert_eq!(doc.repositories[1], added);
    }

    #[test]
    fn failed_clone_leaves_document_untouched() {
        let dir = TempDir::new().expect("tempdir");
        let config_path = dir.path().join("config.yml");

        let exec = ScriptedExecutor::new().on(&["clone"], CommandOutput::failure(128, "not found"));
        let git = Git::with_executor(exec, true);
        let err = bootstrap(&git, &config_path, &ssh_spec(), Path::new("/srv/notes")).unwrap_err();

        assert!(matches!(err, SyncError::CommandFailed { .. }));
        assert!(!config_path.exists());
    }

    #[test]
    fn already_tracked_path_is_rejected_before_cloning() {
        let dir = TempDir::new().expect("tempdir");
        let config_path = dir.path().join("config.yml");
        std::fs::write(&config_path, "repositories:\n  - local_path: /srv/notes\n").expect("seed");

        let exec = ScriptedExecutor::new();
        let git = Git::with_executor(exec.clone(), true);
        let err = bootstrap(&git, &config_path, &ssh_spec(), Path::new("/srv/notes")).unwrap_err();

        assert!(matches!(err, SyncError::Config(ConfigError::Invalid(_))));
        assert!(exec.commands().is_empty());
    }

    #[test]
    fn missing_protocol_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let git = Git::with_executor(ScriptedExecutor::new(), true);
        let spec = RemoteSpec {
            protocol: None,
            ..ssh_spec()
        };
        let err = bootstrap(&git, &dir.path().join("c.yml"), &spec, Path::new("/srv/x")).unwrap_err();
        assert!(matches!(err, SyncError::Config(ConfigError::Invalid(_))));
    }
}
