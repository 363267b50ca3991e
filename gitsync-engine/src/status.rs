//! Parser for `git status --short` output.
//!
//! Each line is `<code> <path>`; the code is the first whitespace-separated
//! token after trimming. Only four codes count as changes; everything else
//! (`MM`, `AM`, `R`, `UU`, ...) parses to [`StatusCode::Unrecognized`] and is
//! ignored by the commit stage.

use std::fmt;

/// Classified status code of one short-status entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCode {
    /// `??`
    Untracked,
    /// `A`
    Added,
    /// `M`
    Modified,
    /// `D`
    Deleted,
    /// Any other code, kept verbatim.
    Unrecognized(String),
}

impl StatusCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "??" => StatusCode::Untracked,
            "A" => StatusCode::Added,
            "M" => StatusCode::Modified,
            "D" => StatusCode::Deleted,
            other => StatusCode::Unrecognized(other.to_string()),
        }
    }

    /// `true` for the four codes that count towards a commit.
    pub fn is_change(&self) -> bool {
        !matches!(self, StatusCode::Unrecognized(_))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Untracked => f.write_str("untracked"),
            StatusCode::Added => f.write_str("new file"),
            StatusCode::Modified => f.write_str("modified"),
            StatusCode::Deleted => f.write_str("deleted"),
            StatusCode::Unrecognized(code) => write!(f, "unrecognized ({code})"),
        }
    }
}

/// One parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: StatusCode,
    pub path: String,
}

impl StatusEntry {
    /// Parse a single line; blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let mut parts = line.splitn(2, char::is_whitespace);
        let code = parts.next().filter(|c| !c.is_empty())?;
        let path = parts.next().unwrap_or_default().trim();
        Some(Self {
            code: StatusCode::parse(code),
            path: path.to_string(),
        })
    }
}

/// Counts the commit stage acts on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    /// Entries with code `??`.
    pub untracked: usize,
    /// Entries with any of `??`, `A`, `M`, `D`.
    pub changed: usize,
}

impl StatusSummary {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a StatusEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |mut summary, entry| {
                if entry.code == StatusCode::Untracked {
                    summary.untracked += 1;
                }
                if entry.code.is_change() {
                    summary.changed += 1;
                }
                summary
            })
    }
}

/// Parse every non-blank line of `git status --short`.
pub fn parse_status(lines: &[String]) -> Vec<StatusEntry> {
    lines.iter().filter_map(|line| StatusEntry::parse(line)).collect()
}
