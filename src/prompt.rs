use crate::config::{BatteryConfig, Config, JobsConfig};
use crate::parsers::BatteryReading;
use crate::platform::{OsFamily, ProcessIds};
use crate::powerline::{compose, Powerline};
use crate::runner::{CommandRunner, TokioCommandRunner, DEFAULT_COMMAND_TIMEOUT};
use crate::segments::{jobs_probe_for, override_from_env, BatterySegment, JobsSegment, SegmentKind, DEFAULT_JOIN_TIMEOUT};
use crate::style::{BatteryStyle, JobsStyle, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};
use crate::themes::{get_theme, Theme};
use crate::utils::{debug_with_context, warn};
use std::sync::Arc;
use std::time::Duration;

/// What the segments need from the outside world for one render.
pub struct PromptContext {
    pub runner: Arc<dyn CommandRunner>,
    pub family: OsFamily,
    pub ids: ProcessIds,
    pub battery_override: Option<BatteryReading>,
}

impl PromptContext {
    pub fn from_config(config: &Config) -> Self {
        let timeout = config
            .command_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT);
        let family = OsFamily::detect(config.platform.as_deref());
        debug_with_context("prompt", &format!("platform family: {}", family.name()));

        Self {
            runner: Arc::new(TokioCommandRunner::new(timeout)),
            family,
            ids: ProcessIds::current(),
            battery_override: override_from_env(),
        }
    }
}

pub fn battery_style(config: &BatteryConfig, theme: &Theme) -> BatteryStyle {
    let low = config.low_threshold.unwrap_or(DEFAULT_LOW_THRESHOLD);
    let high = config.high_threshold.unwrap_or(DEFAULT_HIGH_THRESHOLD);

    let mut style = match BatteryStyle::new(theme.battery, low, high) {
        Ok(style) => style,
        Err(e) => {
            warn(&format!("Invalid battery thresholds ({}, {}): {}; using defaults", low, high, e));
            BatteryStyle::from_colors(theme.battery)
        }
    };

    if let Some(full) = config.full_threshold {
        style = style.with_full_threshold(full);
    }
    if config.discharging_icon.is_some() || config.ac_power_icon.is_some() {
        let discharging = config
            .discharging_icon
            .clone()
            .unwrap_or_else(|| style.discharging_icon.clone());
        let ac_power = config.ac_power_icon.clone().unwrap_or_else(|| style.ac_power_icon.clone());
        style = style.with_icons(discharging, ac_power);
    }
    style
}

pub fn jobs_style(config: &JobsConfig, theme: &Theme) -> JobsStyle {
    let style = JobsStyle::new(theme.jobs);
    if config.exclamation == Some(false) {
        style.plain()
    } else {
        style
    }
}

/// Instantiate the configured segments, in prompt order.
pub fn build_segments(config: &Config, theme: &Theme, ctx: &PromptContext) -> Vec<SegmentKind> {
    let battery_config = config.battery.clone().unwrap_or_default();
    let jobs_config = config.jobs.clone().unwrap_or_default();

    let mut segments = Vec::with_capacity(config.segments.len());
    for name in &config.segments {
        match name.as_str() {
            "battery" => {
                let mut segment =
                    BatterySegment::new(Arc::clone(&ctx.runner), ctx.family, battery_style(&battery_config, theme))
                        .with_override(ctx.battery_override);
                segment.enabled = battery_config.enabled;
                segments.push(SegmentKind::Battery(segment));
            }
            "jobs" => {
                let probe = jobs_probe_for(
                    ctx.family,
                    Arc::clone(&ctx.runner),
                    jobs_config.extra_denylist.as_deref().unwrap_or_default(),
                    jobs_config.match_mode.unwrap_or_default(),
                );
                let join_timeout = jobs_config
                    .join_timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_JOIN_TIMEOUT);
                let mut segment =
                    JobsSegment::new(probe, ctx.ids, jobs_style(&jobs_config, theme)).with_join_timeout(join_timeout);
                segment.enabled = jobs_config.enabled;
                segments.push(SegmentKind::Jobs(segment));
            }
            other => warn(&format!("Unknown segment `{}` ignored", other)),
        }
    }
    segments
}

/// One full render pass driven by `config`.
pub async fn render_prompt(config: &Config) -> Powerline {
    let theme = get_theme(&config.theme);
    let ctx = PromptContext::from_config(config);
    let mut segments = build_segments(config, &theme, &ctx);
    compose(&mut segments).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ScriptedRunner;
    use crate::segments::Segment;
    use crate::style::battery_triple;

    fn scripted_context() -> PromptContext {
        PromptContext {
            runner: Arc::new(ScriptedRunner::new()),
            family: OsFamily::GenericPosix,
            ids: ProcessIds::new(100, 99),
            battery_override: None,
        }
    }

    #[test]
    fn test_build_segments_follows_configured_order() {
        let mut config = Config::default();
        config.segments = vec!["jobs".to_string(), "clock".to_string(), "battery".to_string()];
        let segments = build_segments(&config, &get_theme("default"), &scripted_context());
        let names: Vec<&str> = segments.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["jobs", "battery"]);
    }

    #[test]
    fn test_disabled_flags_are_carried_over() {
        let mut config = Config::default();
        config.battery = Some(BatteryConfig {
            enabled: false,
            ..BatteryConfig::default()
        });
        let segments = build_segments(&config, &get_theme("default"), &scripted_context());
        assert!(!segments[0].is_enabled());
        assert!(segments[1].is_enabled());
    }

    #[test]
    fn test_inverted_thresholds_fall_back_to_defaults() {
        let theme = get_theme("default");
        let config = BatteryConfig {
            low_threshold: Some(80),
            high_threshold: Some(20),
            ..BatteryConfig::default()
        };
        assert_eq!(battery_style(&config, &theme), BatteryStyle::from_colors(theme.battery));
    }

    #[test]
    fn test_battery_style_uses_theme_and_icons() {
        let theme = get_theme("basic");
        let config = BatteryConfig {
            ac_power_icon: Some("AC".to_string()),
            ..BatteryConfig::default()
        };
        let style = battery_style(&config, &theme);
        let triple = battery_triple(50, false, &style).unwrap();
        assert_eq!(triple.text, " 50% AC");
        assert_eq!(triple.colors(), theme.battery.normal);
    }

    #[test]
    fn test_jobs_style_plain_variant() {
        let theme = get_theme("default");
        let config = JobsConfig {
            exclamation: Some(false),
            ..JobsConfig::default()
        };
        assert!(!jobs_style(&config, &theme).exclamation);
        assert!(jobs_style(&JobsConfig::default(), &theme).exclamation);
    }
}
