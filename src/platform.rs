use serde::{Deserialize, Serialize};

/// The three flavours of `ps`/battery tooling the probes know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsFamily {
    #[serde(rename = "darwin", alias = "macos")]
    MacOs,
    #[serde(rename = "cygwin")]
    CygwinLike,
    #[serde(rename = "posix", alias = "linux")]
    GenericPosix,
}

impl OsFamily {
    /// Parse the short names accepted in config and `POWERLINE_SEGMENTS_PLATFORM`.
    pub fn from_config_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "darwin" | "macos" => Some(OsFamily::MacOs),
            "cygwin" => Some(OsFamily::CygwinLike),
            "posix" | "linux" => Some(OsFamily::GenericPosix),
            _ => None,
        }
    }

    /// Family of the platform this binary was built for.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => OsFamily::MacOs,
            "windows" | "cygwin" => OsFamily::CygwinLike,
            _ => OsFamily::GenericPosix,
        }
    }

    /// Resolve the family once at startup, honouring an explicit override.
    pub fn detect(override_name: Option<&str>) -> Self {
        override_name
            .and_then(Self::from_config_name)
            .unwrap_or_else(Self::current)
    }

    pub fn name(&self) -> &'static str {
        match self {
            OsFamily::MacOs => "darwin",
            OsFamily::CygwinLike => "cygwin",
            OsFamily::GenericPosix => "posix",
        }
    }
}

/// Our own pid and the pid of the shell that launched us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessIds {
    pub pid: u32,
    pub parent: Option<u32>,
}

impl ProcessIds {
    pub fn new(pid: u32, parent: u32) -> Self {
        Self {
            pid,
            parent: Some(parent),
        }
    }

    pub fn current() -> Self {
        Self {
            pid: std::process::id(),
            parent: parent_pid(),
        }
    }
}

#[cfg(unix)]
fn parent_pid() -> Option<u32> {
    Some(std::os::unix::process::parent_id())
}

#[cfg(not(unix))]
fn parent_pid() -> Option<u32> {
    None
}
