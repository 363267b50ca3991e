//! Command execution seam.
//!
//! Everything the engine does to a repository goes through
//! [`CommandExecutor::execute`]. Commands run in the process's current working
//! directory; the scheduler is responsible for pointing it at the repository.

use std::process::{Command, Stdio};

/// Captured result of one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status; `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    /// Standard output split on line boundaries, trailing whitespace trimmed.
    pub lines: Vec<String>,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            status: Some(0),
            lines: lines.into_iter().map(Into::into).collect(),
            stderr: String::new(),
        }
    }

    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            lines: vec![],
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs a program with arguments in the current working directory.
///
/// Implementations return `Err` only when the program could not be started;
/// a non-zero exit is reported through [`CommandOutput::status`].
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn execute(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        (**self).execute(program, args)
    }
}

/// [`CommandExecutor`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(CommandOutput {
            status: output.status.code(),
            lines: split_lines(&String::from_utf8_lossy(&output.stdout)),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

pub(crate) fn split_lines(stdout: &str) -> Vec<String> {
    stdout.lines().map(|line| line.trim_end().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_trims_trailing_whitespace_only() {
        let lines = split_lines(" M notes.md  \r\n?? todo.txt\n");
        assert_eq!(lines, vec![" M notes.md", "?? todo.txt"]);
    }

    #[test]
    fn success_and_failure_constructors() {
        assert!(CommandOutput::success(["a"]).is_success());
        assert!(!CommandOutput::failure(1, "boom").is_success());
    }

    #[cfg(unix)]
    #[test]
    fn process_executor_reports_nonzero_status() {
        let output = ProcessExecutor
            .execute("sh", &["-c".to_string(), "echo out; exit 3".to_string()])
            .expect("spawn sh");
        assert_eq!(output.status, Some(3));
        assert_eq!(output.lines, vec!["out"]);
    }

    #[test]
    fn process_executor_spawn_error_for_missing_binary() {
        let err = ProcessExecutor
            .execute("gitsync-no-such-binary", &[])
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
