//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::Project;

/// DPT configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Currency label shown on grand totals
    pub currency: Option<String>,

    /// Default output format
    pub default_format: Option<String>,

    /// Override for the protective-device sizing margin
    pub safety_margin: Option<f64>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/dpt/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Project config (.dpt/config.yaml)
        if let Some(project) = project {
            let project_config_path = project.dpt_dir().join("config.yaml");
            if project_config_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&project_config_path) {
                    if let Ok(project_config) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(project_config);
                    }
                }
            }
        }

        // 4. Environment variables
        if let Ok(currency) = std::env::var("DPT_CURRENCY") {
            config.currency = Some(currency);
        }
        if let Ok(margin) = std::env::var("DPT_SAFETY_MARGIN") {
            if let Ok(margin) = margin.parse::<f64>() {
                config.safety_margin = Some(margin);
            }
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dpt")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.currency.is_some() {
            self.currency = other.currency;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.safety_margin.is_some() {
            self.safety_margin = other.safety_margin;
        }
    }

    /// Currency label, defaulting to EUR
    pub fn currency(&self) -> String {
        self.currency.clone().unwrap_or_else(|| "EUR".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_currency() {
        let config = Config::default();
        assert_eq!(config.currency(), "EUR");
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = Config::default();
        base.merge(Config {
            currency: Some("USD".to_string()),
            default_format: None,
            safety_margin: Some(1.3),
        });
        assert_eq!(base.currency(), "USD");
        assert_eq!(base.safety_margin, Some(1.3));
        assert!(base.default_format.is_none());
    }

    #[test]
    fn test_merge_keeps_existing_when_other_empty() {
        let mut base = Config {
            currency: Some("GBP".to_string()),
            default_format: Some("md".to_string()),
            safety_margin: None,
        };
        base.merge(Config::default());
        assert_eq!(base.currency(), "GBP");
        assert_eq!(base.default_format.as_deref(), Some("md"));
    }
}
