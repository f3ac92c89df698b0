pub mod loader;
pub mod defaults;

pub use loader::*;
pub use defaults::*;

use crate::parsers::PidMatchMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    /// Segment names in prompt order.
    pub segments: Vec<String>,
    #[serde(rename = "commandTimeoutMs")]
    pub command_timeout_ms: Option<u64>,
    /// Force a platform family: `darwin`, `cygwin` or `posix`.
    pub platform: Option<String>,
    pub battery: Option<BatteryConfig>,
    pub jobs: Option<JobsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    pub enabled: bool,
    #[serde(rename = "lowThreshold")]
    pub low_threshold: Option<u8>,
    #[serde(rename = "highThreshold")]
    pub high_threshold: Option<u8>,
    #[serde(rename = "fullThreshold")]
    pub full_threshold: Option<u8>,
    #[serde(rename = "dischargingIcon")]
    pub discharging_icon: Option<String>,
    #[serde(rename = "acPowerIcon")]
    pub ac_power_icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    pub enabled: bool,
    pub exclamation: Option<bool>,
    #[serde(rename = "joinTimeoutMs")]
    pub join_timeout_ms: Option<u64>,
    /// Appended to the built-in macOS denylist.
    #[serde(rename = "extraDenylist")]
    pub extra_denylist: Option<Vec<String>>,
    #[serde(rename = "matchMode")]
    pub match_mode: Option<PidMatchMode>,
}
