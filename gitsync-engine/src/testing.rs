//! Scripted [`CommandExecutor`] for tests.
//!
//! Replies are matched on an argument prefix and, optionally, on the working
//! directory the command runs in. Later rules take precedence. A command with
//! no matching rule succeeds with empty output, which the stages read as
//! "nothing to do".

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::executor::{CommandExecutor, CommandOutput};

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory at the time of the call.
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Arguments joined with spaces, e.g. `"push --quiet origin master"`.
    pub fn command(&self) -> String {
        self.args.join(" ")
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    SpawnError,
}

#[derive(Debug, Clone)]
struct Rule {
    cwd: Option<PathBuf>,
    prefix: Vec<String>,
    reply: Reply,
}

#[derive(Debug, Default)]
struct Inner {
    rules: Vec<Rule>,
    calls: Vec<Invocation>,
}

/// Cloneable handle; clones share rules and the call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `output` to any command starting with `prefix`.
    pub fn on(self, prefix: &[&str], output: CommandOutput) -> Self {
        self.push_rule(None, prefix, Reply::Output(output))
    }

    /// Like [`ScriptedExecutor::on`], restricted to commands run inside `dir`.
    pub fn on_in(self, dir: &Path, prefix: &[&str], output: CommandOutput) -> Self {
        self.push_rule(Some(normalize(dir)), prefix, Reply::Output(output))
    }

    /// Fail to start any command starting with `prefix`.
    pub fn spawn_error(self, prefix: &[&str]) -> Self {
        self.push_rule(None, prefix, Reply::SpawnError)
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.lock().calls.clone()
    }

    /// Every recorded call rendered with [`Invocation::command`].
    pub fn commands(&self) -> Vec<String> {
        self.lock().calls.iter().map(Invocation::command).collect()
    }

    /// Calls made while the working directory was `dir`.
    pub fn commands_in(&self, dir: &Path) -> Vec<String> {
        let dir = normalize(dir);
        self.lock()
            .calls
            .iter()
            .filter(|call| call.cwd.as_deref() == Some(dir.as_path()))
            .map(Invocation::command)
            .collect()
    }

    fn push_rule(self, cwd: Option<PathBuf>, prefix: &[&str], reply: Reply) -> Self {
        self.lock().rules.push(Rule {
            cwd,
            prefix: prefix.iter().map(|p| p.to_string()).collect(),
            reply,
        });
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("scripted executor lock poisoned")
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        let cwd = std::env::current_dir().ok().map(|d| normalize(&d));
        let mut inner = self.lock();
        inner.calls.push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.clone(),
        });

        let reply = inner
            .rules
            .iter()
            .rev()
            .find(|rule| {
                args.starts_with(&rule.prefix)
                    && rule.cwd.as_ref().map_or(true, |dir| cwd.as_ref() == Some(dir))
            })
            .map(|rule| rule.reply.clone());

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::SpawnError) => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{program}: not found"),
            )),
            None => Ok(CommandOutput::success(Vec::<String>::new())),
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
