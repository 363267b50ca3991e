//! gitsync: keep working copies in step with their central repositories.
//!
//! # Usage
//!
//! ```text
//! gitsync [--file <path>] [--gc] [--loop] [--sleep=<seconds>]
//! gitsync --init --protocol=<scheme> [--remote_user=<user>] [--remote_host=<host>]
//!         [--remote_port=<port>] --remote_path=<path> --local_path=<path> [--file <path>]
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use commands::init::InitArgs;
use gitsync_core::{config, Overrides};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "gitsync",
    version,
    about = "Synchronize local git working copies with their central repositories",
    long_about = None,
)]
struct Cli {
    /// Configuration file. Defaults to config.yml next to the executable.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Run `git gc` after every cycle.
    #[arg(long)]
    gc: bool,

    /// Repeat passes until interrupted.
    #[arg(long = "loop")]
    loop_enabled: bool,

    /// Seconds to wait between passes when looping.
    #[arg(long, value_name = "SECONDS")]
    sleep: Option<u64>,

    /// Clone a remote repository and add it to the configuration, then exit.
    #[arg(long)]
    init: bool,

    #[command(flatten)]
    remote: InitArgs,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            gc: self.gc.then_some(true),
            loop_enabled: self.loop_enabled.then_some(true),
            sleep: self.sleep,
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.file.clone() {
        Some(path) => path,
        None => config::default_config_path().context("could not locate default configuration")?,
    };
    let doc = config::load_document(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    gitsync_daemon::init_tracing(doc.loglevel);

    if cli.init {
        return cli.remote.run(&config_path, doc.loglevel);
    }
    let overrides = cli.overrides();
    commands::sync::run(doc, &overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::parse_from(["gitsync", "--gc", "--loop", "--sleep=5"]);
        assert_eq!(
            cli.overrides(),
            Overrides {
                gc: Some(true),
                loop_enabled: Some(true),
                sleep: Some(5),
            }
        );
    }

    #[test]
    fn absent_flags_leave_document_values() {
        let cli = Cli::parse_from(["gitsync"]);
        assert_eq!(cli.overrides(), Overrides::default());
        assert!(!cli.init);
    }

    #[test]
    fn underscore_remote_flags_parse() {
        let cli = Cli::parse_from([
            "gitsync",
            "--init",
            "--protocol=ssh",
            "--remote_user=git",
            "--remote_host=central",
            "--remote_port=2222",
            "--remote_path=srv/notes.git",
            "--local_path=/srv/notes",
        ]);
        assert!(cli.init);
        let spec = cli.remote.spec();
        assert_eq!(spec.protocol.as_deref(), Some("ssh"));
        assert_eq!(spec.remote_port.as_deref(), Some("2222"));
        assert_eq!(cli.remote.local_path, Some(PathBuf::from("/srv/notes")));
    }
}
