use anyhow::{bail, Context};
use chrono::FixedOffset;
use ds1388::{Diode, Resistor, TrickleCharger};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    pub device: DeviceConfig,
    pub location: LocationConfig,
    #[serde(default)]
    pub power: PowerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_address")]
    pub address: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub timezone_offset_hours: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerConfig {
    /// `"off"`, `"250"`, `"2k"` or `"4k"`, optionally followed by `"+diode"`
    pub trickle_charger: Option<String>,
}

fn default_address() -> u8 {
    ds1388::DEVICE_ADDRESS
}

impl ClockConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: ClockConfig = toml::from_str(content).context("invalid clock configuration")?;
        config.utc_offset()?;
        config.trickle_charger()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        // Try external file first
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config = Self::from_toml_str(&content)?;
            log::info!("Loaded clock configuration from {}", path.display());
            Ok(config)
        } else {
            // Fallback to embedded defaults
            let config = Self::from_toml_str(include_str!("../config.toml.example"))?;
            log::warn!("{} not found, using embedded default configuration", path.display());
            Ok(config)
        }
    }

    pub fn utc_offset(&self) -> anyhow::Result<FixedOffset> {
        let hours = self.location.timezone_offset_hours;
        if !(-23..=23).contains(&hours) {
            bail!("timezone offset of {} hours is out of range", hours);
        }
        FixedOffset::east_opt(hours * 3600)
            .with_context(|| format!("timezone offset of {} hours is out of range", hours))
    }

    pub fn trickle_charger(&self) -> anyhow::Result<Option<TrickleCharger>> {
        let Some(setting) = self.power.trickle_charger.as_deref() else {
            return Ok(None);
        };
        let (resistor, diode) = match setting.strip_suffix("+diode") {
            Some(resistor) => (resistor, Diode::One),
            None => (setting, Diode::None),
        };
        let resistor = match resistor.trim() {
            "off" if diode == Diode::None => return Ok(Some(TrickleCharger::Disabled)),
            "250" => Resistor::R250,
            "2k" => Resistor::R2k,
            "4k" => Resistor::R4k,
            _ => bail!("unknown trickle charger setting {:?}", setting),
        };
        Ok(Some(TrickleCharger::Enabled { diode, resistor }))
    }
}
