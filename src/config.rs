use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClockConfig {
    /// Fixed "now" (RFC 3339). Unset means wall-clock time.
    #[serde(default)]
    pub now: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LabelsConfig {
    /// Twelve month abbreviations, January first.
    #[serde(default)]
    pub months: Option<Vec<String>>,
    /// msgid -> translated label.
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl ClockConfig {
    pub fn fixed_now(&self) -> Result<Option<DateTime<Utc>>> {
        self.now.as_deref().map(parse_instant).transpose()
    }
}

/// Parse an RFC 3339 instant and normalise it to UTC.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid RFC 3339 timestamp: '{}'", value))?;
    Ok(parsed.with_timezone(&Utc))
}

pub fn validate_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        other => anyhow::bail!("Unknown output format: '{}'. Must be text or json.", other),
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate_format(&config.output.format)?;

    config
        .clock
        .fixed_now()
        .with_context(|| "clock.now must be an RFC 3339 timestamp")?;

    if let Some(months) = &config.labels.months {
        if months.len() != 12 {
            anyhow::bail!(
                "labels.months must list exactly 12 names, got {}",
                months.len()
            );
        }
    }

    Ok(config)
}
