//! Default mode: run the scheduler over every configured repository.

use anyhow::{Context, Result};

use gitsync_core::{config, ConfigDocument, Overrides, SyncConfig};
use gitsync_daemon::RunOutcome;

pub fn run(doc: ConfigDocument, overrides: &Overrides) -> Result<()> {
    let config = SyncConfig::from_document(doc, overrides, config::resolve_host_name())
        .context("invalid configuration")?;

    let outcome = gitsync_daemon::start_blocking(config).context("synchronization failed")?;
    if outcome == RunOutcome::Interrupted {
        eprintln!("gitsync: interrupted");
    }
    Ok(())
}
