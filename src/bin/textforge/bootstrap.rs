use chrono::prelude::*;
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use textforge::constants::config::{
    DEFAULT_CONF_FILE, DEFAULT_FLAKINESS_WINDOW, DEFAULT_SLOW_THRESHOLD_MS, DEFAULT_TOOL,
};
use textforge::debug;
pub use textforge::{
    config::{parse as config_parse, MainConfig},
    error::*,
};

use crate::directories::PROJECT_DIRS;

static DEFAULT_CONF: &str = "# File automatically generated on ${date}\n\
                            [defaults]\n\
                            tool = \"${default_tool}\"\n\n\
                            # Default options per tool (values are strings), e.g.\n\
                            # [options.word-wrap]\n\
                            # width = \"80\"\n\n\
                            [qa]\n\
                            slow_threshold_ms = ${slow_threshold}\n\
                            window            = ${window}\n\
                            skip              = []\n";

#[derive(Debug)]
pub struct BootStrap {
    config: MainConfig,
}

impl BootStrap {
    pub fn new() -> Result<Self> {
        Ok(BootStrap {
            config: BootStrap::init()?,
        })
    }

    /// Locates the main configuration file and parses it, creating a
    /// default one on first run.
    ///
    /// # Returns
    /// A `Result` containing the main configuration.
    pub fn init() -> Result<MainConfig> {
        parse_main_config(&config_file()?)
    }

    pub fn get_config(&self) -> &MainConfig {
        &self.config
    }
}

/// Retrieves the main configuration file path inside the config directory
/// ($TEXTFORGE_CONFIG_DIR or the platform default), expanding any
/// environment variable it references.
///
/// # Errors
/// Returns an error if no configuration directory can be determined or the
/// directory path cannot be interpolated
fn config_file() -> Result<PathBuf> {
    let dirs = PROJECT_DIRS.as_ref().ok_or_else(|| {
        Error::ConfigError("the configuration directory (no home directory found)".to_string())
    })?;

    let config_dir = dirs.config_dir().to_string_lossy().to_string();
    let config_dir = match shellexpand::env(&config_dir) {
        Ok(dir) => dir.to_string(),
        Err(e) => {
            return Err(Error::InterpolationError {
                location: ConfigType::MAIN,
                cause: e.to_string(),
            });
        }
    };

    Ok(PathBuf::from(config_dir).join(DEFAULT_CONF_FILE))
}

/// Creates the default main configuration file in the config directory
/// # Arguments
/// * `config_file` - The path to the configuration file
///
/// # Returns
/// A `Result` containing the configuration data as a `String`
///
/// # Errors
/// * `ConfigError` - If the configuration file cannot be created
/// * `IoError` - If an I/O error occurs while creating the configuration file
fn create_default_config(config_file: &Path) -> Result<String> {
    let parent_dir = config_file
        .parent()
        .ok_or_else(|| Error::ConfigError(config_file.to_string_lossy().into_owned()))?;
    std::fs::create_dir_all(parent_dir)?;
    let current_date: DateTime<Local> = Local::now();
    let config_data = DEFAULT_CONF
        .replacen("${date}", &current_date.to_string(), 1)
        .replacen("${default_tool}", DEFAULT_TOOL, 1)
        .replacen("${slow_threshold}", &DEFAULT_SLOW_THRESHOLD_MS.to_string(), 1)
        .replacen("${window}", &DEFAULT_FLAKINESS_WINDOW.to_string(), 1);

    File::create(config_file)?.write_all(config_data.as_bytes())?;
    debug!("Created default configuration in {}", config_file.display());
    Ok(config_data)
}

/// Processes the main configuration file retrieving the associated `MainConfig` structure
///
/// This function reads the configuration file and returns a `MainConfig` structure.
/// If the file does not exist, it creates a default configuration file.
///
/// # Errors
///
/// This function returns an error if the configuration file cannot be read or parsed.
pub fn parse_main_config(conf_file: &Path) -> Result<MainConfig> {
    let toml_data = match config_parse(conf_file) {
        Ok(data) => data,
        Err(Error::Io(e)) if e.kind() == ::std::io::ErrorKind::NotFound => {
            create_default_config(conf_file)?
        }
        Err(Error::Io(e)) => {
            return Err(Error::ConfigReadError {
                file: String::from(DEFAULT_CONF_FILE),
                cause: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    MainConfig::from_toml(&toml_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_creates_a_parseable_default() {
        let dir = tempfile::tempdir().unwrap();
        let conf_file = dir.path().join("nested").join(DEFAULT_CONF_FILE);

        let config = parse_main_config(&conf_file).unwrap();
        assert!(conf_file.exists());
        assert_eq!(config.defaults.tool, DEFAULT_TOOL);
        assert_eq!(config.qa.window, DEFAULT_FLAKINESS_WINDOW);
        assert!(config.qa.skip.is_empty());

        let contents = std::fs::read_to_string(&conf_file).unwrap();
        assert!(contents.starts_with("# File automatically generated on"));
        assert!(!contents.contains("${"));
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let conf_file = dir.path().join(DEFAULT_CONF_FILE);
        std::fs::write(&conf_file, "[defaults]\ntool = \"kebab-case\"\n").unwrap();

        let config = parse_main_config(&conf_file).unwrap();
        assert_eq!(config.defaults.tool, "kebab-case");
    }

    #[test]
    fn test_broken_file_reports_toml_error() {
        let dir = tempfile::tempdir().unwrap();
        let conf_file = dir.path().join(DEFAULT_CONF_FILE);
        std::fs::write(&conf_file, "[qa\n").unwrap();

        assert!(matches!(
            parse_main_config(&conf_file),
            Err(Error::SerdeTomlError { .. })
        ));
    }
}
