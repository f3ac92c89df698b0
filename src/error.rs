use std::time::Duration;
use thiserror::Error;

/// Result of a single probe step (command, parse, or background join).
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Why a probe produced no value.
///
/// None of these ever escape a segment: the segment logs them and falls back
/// to its zero/absent reading.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("`{program}` is not available: {source}")]
    ToolUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}")]
    NonZeroExit { program: String, status: String },

    #[error("`{program}` did not finish within {}ms", .timeout.as_millis())]
    TimedOut { program: String, timeout: Duration },

    #[error("failed waiting on `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find {what} in probe output")]
    ParseMiss { what: &'static str },

    #[error("{0}")]
    Unexpected(String),
}

impl ProbeError {
    pub fn parse_miss(what: &'static str) -> Self {
        Self::ParseMiss { what }
    }
}

/// Invalid threshold band table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("a band table needs at least one band")]
    Empty,

    #[error("band bounds must be strictly ascending ({previous} then {next})")]
    NotAscending { previous: u32, next: u32 },

    #[error("only the last band may be unbounded")]
    UnboundedBeforeEnd,

    #[error("the last band must be unbounded so every value maps to a band")]
    NotExhaustive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_message_names_program() {
        let missing = ProbeError::ToolUnavailable {
            program: "acpi".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(missing.to_string(), "`acpi` is not available: not found");
        assert_eq!(
            ProbeError::parse_miss("percentage").to_string(),
            "could not find percentage in probe output"
        );
    }

    #[test]
    fn test_timeout_message_mentions_millis() {
        let err = ProbeError::TimedOut {
            program: "ps".to_string(),
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "`ps` did not finish within 250ms");
    }
}
