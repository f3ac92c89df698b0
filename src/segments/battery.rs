use crate::parsers::{parse_battery, BatteryReading};
use crate::platform::OsFamily;
use crate::powerline::Powerline;
use crate::runner::{CommandRunner, CommandSpec};
use crate::segments::Segment;
use crate::style::{battery_triple, BatteryStyle, RenderTriple};
use crate::utils::debug_with_context;
use std::env;
use std::sync::Arc;

/// Fixed battery percentage for demos and tests; skips the probe entirely.
pub const LEVEL_OVERRIDE_ENV: &str = "BATT_LEVEL";
/// Paired with `BATT_LEVEL`; any non-blank value means discharging.
pub const STATUS_OVERRIDE_ENV: &str = "BATT_STATUS";

/// Read the override pair from the process environment.
pub fn override_from_env() -> Option<BatteryReading> {
    override_from_lookup(|key| env::var(key).ok())
}

pub fn override_from_lookup<F>(lookup: F) -> Option<BatteryReading>
where
    F: Fn(&str) -> Option<String>,
{
    let raw_level = lookup(LEVEL_OVERRIDE_ENV)?;
    let raw_level = raw_level.trim();
    if raw_level.is_empty() {
        return None;
    }

    let level = match raw_level.parse::<u32>() {
        Ok(level) => level.min(100) as u8,
        Err(_) => {
            debug_with_context(
                "battery",
                &format!("ignoring {}={:?}: not a percentage", LEVEL_OVERRIDE_ENV, raw_level),
            );
            return None;
        }
    };

    let discharging = lookup(STATUS_OVERRIDE_ENV).is_some_and(|status| !status.trim().is_empty());
    Some(BatteryReading::new(level, discharging))
}

/// Battery charge, probed inline while the prompt renders.
pub struct BatterySegment {
    pub enabled: bool,
    runner: Arc<dyn CommandRunner>,
    family: OsFamily,
    style: BatteryStyle,
    override_reading: Option<BatteryReading>,
}

impl BatterySegment {
    pub fn new(runner: Arc<dyn CommandRunner>, family: OsFamily, style: BatteryStyle) -> Self {
        Self {
            enabled: true,
            runner,
            family,
            style,
            override_reading: None,
        }
    }

    pub fn with_override(mut self, reading: Option<BatteryReading>) -> Self {
        self.override_reading = reading;
        self
    }

    pub fn command_for(family: OsFamily) -> CommandSpec {
        match family {
            OsFamily::MacOs => CommandSpec::new("pmset").args(["-g", "batt"]),
            OsFamily::CygwinLike | OsFamily::GenericPosix => CommandSpec::new("acpi"),
        }
    }

    /// Current reading; absent when the tool is missing or reports no battery.
    pub async fn reading(&self) -> BatteryReading {
        if let Some(reading) = self.override_reading {
            debug_with_context("battery", &format!("using override {:?}", reading));
            return reading;
        }

        let command = Self::command_for(self.family);
        match self.runner.run(&command).await {
            Ok(output) => parse_battery(&output),
            Err(e) => {
                debug_with_context("battery", &format!("probe failed: {}", e));
                BatteryReading::absent()
            }
        }
    }

    pub async fn render(&self) -> Option<RenderTriple> {
        if !self.enabled {
            return None;
        }

        let reading = self.reading().await;
        let Some(level) = reading.level else {
            debug_with_context("battery", "no battery reported");
            return None;
        };

        battery_triple(level, reading.is_discharging, &self.style)
    }

    pub async fn add_to_powerline(&self, powerline: &mut Powerline) {
        if let Some(triple) = self.render().await {
            powerline.append(triple);
        }
    }
}

impl Segment for BatterySegment {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
