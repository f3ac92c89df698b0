use regex::Regex;
use std::sync::OnceLock;

/// Substring whose presence marks the battery as discharging.
///
/// Tool output is locale dependent; a translated status word reads as "on AC".
pub const DISCHARGING_TOKEN: &str = "discharging";

static PERCENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn percent_regex() -> &'static Regex {
    PERCENT_REGEX.get_or_init(|| Regex::new(r"([0-9]+)%").expect("Failed to compile battery percentage regex"))
}

/// Battery state from one probe. `level` is absent when no battery was reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatteryReading {
    pub level: Option<u8>,
    pub is_discharging: bool,
}

impl BatteryReading {
    pub fn new(level: u8, is_discharging: bool) -> Self {
        Self {
            level: Some(level.min(100)),
            is_discharging,
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.level.is_some()
    }
}

/// Read `pmset -g batt` or `acpi` output.
///
/// ```text
/// Now drawing from 'Battery Power'
///  -InternalBattery-0 (id=3866723)	85%; discharging; (no estimate) present: true
/// Battery 0: Discharging, 85%, 01:54:12 remaining
/// ```
///
/// The first `NN%` wins. Note that acpi capitalises "Discharging", which the
/// case-sensitive check does not match.
pub fn parse_battery(text: &str) -> BatteryReading {
    let level = percent_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|value| value.min(100) as u8);

    BatteryReading {
        level,
        is_discharging: is_discharging(text),
    }
}

pub fn is_discharging(text: &str) -> bool {
    text.contains(DISCHARGING_TOKEN)
}
