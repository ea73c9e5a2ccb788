use crate::config::{LSystemConfig, DEFAULT_MAX_SYMBOLS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional user settings from `~/.config/lsysart/config.toml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub lsystem: LSystemSettings,
    #[serde(default)]
    pub render: RenderSettings,
}

/// Overrides applied on top of the selected preset.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct LSystemSettings {
    pub preset: Option<String>,
    pub axiom: Option<String>,
    pub rules: Option<String>,
    pub iterations: Option<u32>,
    pub angle: Option<f64>,
    pub start_angle: Option<f64>,
    pub length: Option<f64>,
    pub angle_jitter: Option<f64>,
    pub length_jitter: Option<f64>,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    pub padding: f64, // In braille dots
    pub color_scheme: u8, // 0-5, see colors.rs
    pub max_symbols: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            padding: 2.0,
            color_scheme: 0,
            max_symbols: DEFAULT_MAX_SYMBOLS,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`. A missing or unreadable file gives the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid settings file");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read settings file");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lsysart")
            .join("config.toml")
    }
}

impl LSystemSettings {
    /// Overwrite the fields of `config` that are set here.
    pub fn apply(&self, config: &mut LSystemConfig) {
        if let Some(ref axiom) = self.axiom {
            config.axiom = axiom.clone();
        }
        if let Some(ref rules) = self.rules {
            config.rules = rules.clone();
        }
        if let Some(v) = self.iterations {
            config.iterations = v;
        }
        if let Some(v) = self.angle {
            config.angle = v;
        }
        if let Some(v) = self.start_angle {
            config.start_angle = v;
        }
        if let Some(v) = self.length {
            config.length = v;
        }
        if let Some(v) = self.angle_jitter {
            config.angle_jitter = v;
        }
        if let Some(v) = self.length_jitter {
            config.length_jitter = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}
