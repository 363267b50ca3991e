//! Typed git commands on top of a [`CommandExecutor`].

use crate::error::SyncError;
use crate::executor::{CommandExecutor, ProcessExecutor};

pub const GIT_PROGRAM: &str = "git";

/// Issues git commands and turns non-zero exits into [`SyncError::CommandFailed`].
///
/// When `quiet` is set, commands that chatter on the terminal (`pull`, `push`,
/// `gc`, `clone`) get `--quiet`.
#[derive(Debug, Clone)]
pub struct Git<E = ProcessExecutor> {
    executor: E,
    quiet: bool,
}

impl Git<ProcessExecutor> {
    pub fn new(quiet: bool) -> Self {
        Self::with_executor(ProcessExecutor, quiet)
    }
}

impl<E: CommandExecutor> Git<E> {
    pub fn with_executor(executor: E, quiet: bool) -> Self {
        Self { executor, quiet }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// `git ls-remote <remote> HEAD`, reduced to the revision id.
    pub fn ls_remote_head(&self, remote: &str) -> Result<Option<String>, SyncError> {
        let line = self.first_line(&["ls-remote", remote, "HEAD"])?;
        Ok(line.and_then(|l| {
            l.split('\t')
                .next()
                .map(|rev| rev.trim().to_string())
                .filter(|rev| !rev.is_empty())
        }))
    }

    /// `git rev-parse HEAD`.
    pub fn rev_parse_head(&self) -> Result<Option<String>, SyncError> {
        self.first_line(&["rev-parse", "HEAD"])
    }

    pub fn reset_hard_head(&self) -> Result<(), SyncError> {
        self.run(&["reset", "--hard", "HEAD"]).map(drop)
    }

    pub fn pull(&self, remote: &str, branch: &str) -> Result<(), SyncError> {
        self.run_chatty(&["pull"], &[remote, branch]).map(drop)
    }

    pub fn status_short(&self) -> Result<Vec<String>, SyncError> {
        self.run(&["status", "--short"])
    }

    pub fn add_all(&self) -> Result<(), SyncError> {
        self.run(&["add", "."]).map(drop)
    }

    pub fn commit_all(&self, message: &str) -> Result<(), SyncError> {
        self.run(&["commit", "-a", "-m", message]).map(drop)
    }

    pub fn push(&self, remote: &str, branch: &str) -> Result<(), SyncError> {
        self.run_chatty(&["push"], &[remote, branch]).map(drop)
    }

    pub fn gc(&self) -> Result<(), SyncError> {
        self.run_chatty(&["gc"], &[]).map(drop)
    }

    pub fn clone_into(&self, url: &str, local_path: &str) -> Result<(), SyncError> {
        self.run_chatty(&["clone"], &[url, local_path]).map(drop)
    }

    /// Run `git <args>` and return its output lines.
    pub fn run(&self, args: &[&str]) -> Result<Vec<String>, SyncError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let command = format!("{GIT_PROGRAM} {}", args.join(" "));
        tracing::debug!("{command}");

        let output = self
            .executor
            .execute(GIT_PROGRAM, &args)
            .map_err(|source| SyncError::Spawn {
                command: command.clone(),
                source,
            })?;

        if output.is_success() {
            Ok(output.lines)
        } else {
            Err(SyncError::CommandFailed {
                command,
                status: output.status,
                stderr: output.stderr,
            })
        }
    }

    fn run_chatty(&self, subcommand: &[&str], rest: &[&str]) -> Result<Vec<String>, SyncError> {
        let mut args = subcommand.to_vec();
        if self.quiet {
            args.push("--quiet");
        }
        args.extend_from_slice(rest);
        self.run(&args)
    }

    fn first_line(&self, args: &[&str]) -> Result<Option<String>, SyncError> {
        Ok(self
            .run(args)?
            .into_iter()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty()))
    }
}
