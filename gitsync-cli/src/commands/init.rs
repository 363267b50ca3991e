//! `gitsync --init --protocol=<scheme> ... --local_path=<path>`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use gitsync_core::{LogLevel, RemoteSpec};
use gitsync_engine::{bootstrap, Git};

/// Remote location and clone target for `--init`.
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// URL scheme of the remote: ssh, git, http, https, file, ...
    #[arg(long, value_name = "SCHEME")]
    pub protocol: Option<String>,

    /// Login on the remote host (ssh only).
    #[arg(long = "remote_user", value_name = "USER")]
    pub remote_user: Option<String>,

    #[arg(long = "remote_host", value_name = "HOST")]
    pub remote_host: Option<String>,

    /// Repository path on the remote host.
    #[arg(long = "remote_path", value_name = "PATH")]
    pub remote_path: Option<String>,

    #[arg(long = "remote_port", value_name = "PORT")]
    pub remote_port: Option<String>,

    /// Where to clone the repository locally.
    #[arg(long = "local_path", value_name = "PATH")]
    pub local_path: Option<PathBuf>,
}

impl InitArgs {
    pub fn spec(&self) -> RemoteSpec {
        RemoteSpec {
            protocol: self.protocol.clone(),
            remote_user: self.remote_user.clone(),
            remote_host: self.remote_host.clone(),
            remote_path: self.remote_path.clone(),
            remote_port: self.remote_port.clone(),
        }
    }

    pub fn run(self, config_path: &Path, level: LogLevel) -> Result<()> {
        let local_path = self.local_path.clone().unwrap_or_default();
        let git = Git::new(!level.is_verbose());

        let added = bootstrap::bootstrap(&git, config_path, &self.spec(), &local_path)
            .context("failed to initialize repository")?;

        println!(
            "✓ Cloned {} into {}",
            added.remote_url,
            added.local_path.display()
        );
        println!("  Saved to: {}", config_path.display());
        Ok(())
    }
}
