use crate::config::*;
use crate::parsers::PidMatchMode;
use crate::style::{DEFAULT_FULL_THRESHOLD, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};

pub const DEFAULT_SEGMENTS: &[&str] = &["battery", "jobs"];

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            segments: DEFAULT_SEGMENTS.iter().map(|s| s.to_string()).collect(),
            command_timeout_ms: Some(1000),
            platform: None,
            battery: Some(BatteryConfig::default()),
            jobs: Some(JobsConfig::default()),
        }
    }
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            low_threshold: Some(DEFAULT_LOW_THRESHOLD),
            high_threshold: Some(DEFAULT_HIGH_THRESHOLD),
            full_threshold: Some(DEFAULT_FULL_THRESHOLD),
            discharging_icon: None,
            ac_power_icon: None,
        }
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            exclamation: Some(true),
            join_timeout_ms: Some(1500),
            extra_denylist: None,
            match_mode: Some(PidMatchMode::Substring),
        }
    }
}
