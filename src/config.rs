//! Configuration management
//!
//! Loads engine configuration from config.toml with support for:
//! - Audit outlier-detection threshold
//! - Minimum population for outlier statistics
//!
//! Campaign-specific reward algorithms are not configured here; they live
//! on each campaign row and are parsed by the `algorithm` module.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub audit: AuditSettings,
}

/// Audit report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Standard deviations from the mean payout before a participant is
    /// flagged for manual review
    pub outlier_std_devs: f64,
    /// Minimum number of participants before outlier statistics are computed
    pub min_population: usize,
}

impl Config {
    /// Load from config.toml or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load from specific path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            // Use embedded default config
            toml::from_str(DEFAULT_CONFIG).context("Failed to parse default config")
        }
    }

    /// Effective audit settings (REWARD_AUDIT_STD_DEVS env var takes
    /// precedence over the configured threshold)
    pub fn audit_settings(&self) -> AuditSettings {
        let mut settings = self.audit.clone();
        if let Ok(raw) = std::env::var("REWARD_AUDIT_STD_DEVS") {
            if let Ok(value) = raw.parse::<f64>() {
                settings.outlier_std_devs = value;
            }
        }
        settings
    }
}

impl Default for Config {
    fn default() -> Self {
        // The embedded default config is validated at compile time,
        // so this should never fail. Using a fallback for robustness.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|_| Self {
            audit: AuditSettings::default(),
        })
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            outlier_std_devs: 2.0,
            min_population: 2,
        }
    }
}
