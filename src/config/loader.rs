use crate::config::Config;
use crate::utils::warn;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const THEME_ENV: &str = "POWERLINE_SEGMENTS_THEME";
pub const CONFIG_ENV: &str = "POWERLINE_SEGMENTS_CONFIG";
pub const PLATFORM_ENV: &str = "POWERLINE_SEGMENTS_PLATFORM";

/// Read the explicit file, or the first readable file on the search path,
/// then layer the `POWERLINE_SEGMENTS_*` variables on top.
pub async fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let mut config = if let Some(path) = config_path {
        load_config_file(&path).await?
    } else {
        load_config_from_default_locations().await?
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

async fn load_config_from_default_locations() -> Result<Config> {
    for path in get_config_search_paths() {
        if path.exists() {
            match load_config_file(&path).await {
                Ok(config) => return Ok(config),
                Err(e) => {
                    warn(&format!("Failed to load config from {}: {:#}", path.display(), e));
                }
            }
        }
    }

    Ok(Config::default())
}

/// Get list of paths to search for configuration files
pub fn get_config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".powerline-segments.json")];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("powerline-segments").join("config.json"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config").join("powerline-segments").join("config.json"));
    }
    paths.dedup();

    paths
}

/// Load configuration from a specific file
pub async fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Apply environment variable overrides to configuration
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(theme) = env::var(THEME_ENV) {
        config.theme = theme;
    }

    if let Ok(platform) = env::var(PLATFORM_ENV) {
        config.platform = Some(platform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::PidMatchMode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_partial_config_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"theme": "basic", "jobs": {"enabled": true, "exclamation": false}}"#)
            .await
            .unwrap();

        let config = load_config_file(&path).await.unwrap();
        assert_eq!(config.theme, "basic");
        assert_eq!(config.segments, vec!["battery".to_string(), "jobs".to_string()]);
        let jobs = config.jobs.unwrap();
        assert_eq!(jobs.exclamation, Some(false));
        assert_eq!(jobs.join_timeout_ms, Some(1500));
        assert!(config.battery.unwrap().enabled);
    }

    #[tokio::test]
    async fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        let content = r#"{
            "theme": "default",
            "segments": ["jobs", "battery"],
            "commandTimeoutMs": 250,
            "platform": "darwin",
            "battery": {"enabled": false, "lowThreshold": 15, "dischargingIcon": "BAT"},
            "jobs": {"enabled": true, "matchMode": "exact", "extraDenylist": ["tmux"]}
        }"#;
        fs::write(&path, content).await.unwrap();

        let config = load_config_file(&path).await.unwrap();
        assert_eq!(config.segments, vec!["jobs".to_string(), "battery".to_string()]);
        assert_eq!(config.command_timeout_ms, Some(250));
        assert_eq!(config.platform.as_deref(), Some("darwin"));
        let battery = config.battery.unwrap();
        assert!(!battery.enabled);
        assert_eq!(battery.low_threshold, Some(15));
        assert_eq!(battery.high_threshold, Some(75));
        assert_eq!(battery.discharging_icon.as_deref(), Some("BAT"));
        let jobs = config.jobs.unwrap();
        assert_eq!(jobs.match_mode, Some(PidMatchMode::Exact));
        assert_eq!(jobs.extra_denylist, Some(vec!["tmux".to_string()]));
    }

    #[tokio::test]
    async fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").await.unwrap();

        let err = load_config_file(&path).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[tokio::test]
    async fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_config(Some(temp_dir.path().join("absent.json"))).await.is_err());
    }

    #[test]
    fn test_search_paths_start_with_working_directory() {
        let paths = get_config_search_paths();
        assert_eq!(paths[0], PathBuf::from(".powerline-segments.json"));
    }
}
