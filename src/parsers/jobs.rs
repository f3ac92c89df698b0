use crate::error::{ProbeError, ProbeResult};
use serde::{Deserialize, Serialize};

/// Rows mentioning any of these belong to the shell itself, our own
/// invocation, or helper wrappers, and are never counted as jobs.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "-bash",
    "__git",
    "grep",
    "ps -af",
    "powerline-shell",
    "powerline-segments",
    "poetry shell",
    "bash -i",
];

/// Number of background jobs attached to the interactive shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct JobCount {
    pub count: u32,
}

impl JobCount {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.count == 0
    }

    /// `matches` includes the process doing the counting; drop it, never going below zero.
    fn excluding_self(matches: usize) -> Self {
        Self::new(u32::try_from(matches.saturating_sub(1)).unwrap_or(u32::MAX))
    }
}

/// How the generic POSIX probe matches the grandparent pid in `ps -a -o ppid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PidMatchMode {
    /// Count occurrences of the pid's digits anywhere in the listing. `123`
    /// also matches inside `51234`, so this can over-count.
    #[default]
    Substring,
    /// Compare each listed ppid as an integer.
    Exact,
}

/// Count jobs from a macOS `ps -af` snapshot.
pub fn count_jobs_macos<S: AsRef<str>>(snapshot: &str, parent_pid: u32, denylist: &[S]) -> JobCount {
    let ppid = parent_pid.to_string();
    let rows = snapshot
        .lines()
        .skip(1)
        .filter(|row| row.split_whitespace().any(|token| token == ppid))
        .filter(|row| !denylist.iter().any(|denied| row.contains(denied.as_ref())))
        .count();

    JobCount::new(u32::try_from(rows).unwrap_or(u32::MAX))
}

/// Count jobs from a Cygwin `ps -af` snapshot, where the third column is the ppid.
pub fn count_jobs_cygwin(snapshot: &str, parent_pid: u32) -> ProbeResult<JobCount> {
    let mut matches = 0usize;
    for row in snapshot.lines().skip(1).filter(|row| !row.trim().is_empty()) {
        let ppid = row
            .split_whitespace()
            .nth(2)
            .and_then(|field| field.parse::<u32>().ok())
            .ok_or_else(|| ProbeError::parse_miss("parent pid column"))?;
        if ppid == parent_pid {
            matches += 1;
        }
    }

    Ok(JobCount::excluding_self(matches))
}

/// Parse the output of `ps -p <pid> -oppid=`.
pub fn parse_parent_pid(text: &str) -> ProbeResult<u32> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| ProbeError::parse_miss("grandparent pid"))
}

/// Count jobs from a `ps -a -o ppid` listing relative to the shell's parent.
pub fn count_jobs_posix(listing: &str, grandparent_pid: u32, mode: PidMatchMode) -> JobCount {
    let matches = match mode {
        PidMatchMode::Substring => listing.matches(grandparent_pid.to_string().as_str()).count(),
        PidMatchMode::Exact => listing
            .lines()
            .filter(|line| line.trim().parse::<u32>().ok() == Some(grandparent_pid))
            .count(),
    };

    JobCount::excluding_self(matches)
}
