use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::config::{
    DEFAULT_CONF_FILE, DEFAULT_FLAKINESS_WINDOW, DEFAULT_SLOW_THRESHOLD_MS, DEFAULT_TOOL,
};
use crate::error::*;
use crate::options::Options;

/// Sample inputs used by the QA runner when none are configured
pub const DEFAULT_QA_SAMPLES: [&str; 5] = [
    "Hello World",
    "The quick brown fox jumps over the lazy dog.",
    "hello_world-test CamelCase 123",
    "ünïcödé 日本語 🦀",
    "  leading and trailing spaces  ",
];

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct MainConfig {
    #[serde(default)]
    pub defaults: Defaults,
    /// Per tool default options, keyed by tool name or alias
    #[serde(default)]
    pub options: HashMap<String, Options>,
    #[serde(default)]
    pub qa: QaConfig,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(default)]
pub struct Defaults {
    pub tool: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct QaConfig {
    pub samples: Vec<String>,
    pub slow_threshold_ms: u64,
    pub window: usize,
    pub skip: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Defaults {
        Defaults {
            tool: DEFAULT_TOOL.to_string(),
        }
    }
}

impl Default for QaConfig {
    fn default() -> QaConfig {
        QaConfig {
            samples: DEFAULT_QA_SAMPLES.iter().map(|s| s.to_string()).collect(),
            slow_threshold_ms: DEFAULT_SLOW_THRESHOLD_MS,
            window: DEFAULT_FLAKINESS_WINDOW,
            skip: Vec::new(),
        }
    }
}

impl MainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the TOML contents of a main configuration file
    pub fn from_toml(data: &str) -> Result<Self> {
        let mut config: MainConfig =
            toml::from_str(data).map_err(|e| Error::SerdeTomlError {
                location: ConfigType::MAIN,
                file: String::from(DEFAULT_CONF_FILE),
                cause: e.to_string(),
            })?;
        config.init();
        Ok(config)
    }

    /// Fills in what an explicit but empty section leaves out
    pub fn init(&mut self) {
        if self.defaults.tool.trim().is_empty() {
            self.defaults.tool = DEFAULT_TOOL.to_string();
        }
        if self.qa.samples.is_empty() {
            self.qa.samples = QaConfig::default().samples;
        }
        if self.qa.window == 0 {
            self.qa.window = DEFAULT_FLAKINESS_WINDOW;
        }
    }

    /// Returns the configured default options of a tool, looked up by every
    /// name it is known by (canonical name first).
    pub fn options_for<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Options {
        let mut merged = Options::new();
        for name in names {
            if let Some(options) = self.options.get(name) {
                merged.merge_defaults(options);
            }
        }
        merged
    }
}

pub fn parse(file_path: &Path) -> Result<String> {
    let mut config_content = String::new();
    File::open(file_path)?.read_to_string(&mut config_content)?;
    Ok(config_content)
}
