use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use once_cell::sync::Lazy;

const APP_DIR: &str = "textforge";

/// Location of the configuration directory.
///
/// `$TEXTFORGE_CONFIG_DIR` wins when set. Otherwise macOS follows the XDG
/// layout (`$XDG_CONFIG_HOME` or `~/.config`) and every other platform uses
/// the `dirs_next` config home, both suffixed with `textforge`.
pub struct ProjectDirs {
    config_dir: PathBuf,
}

impl ProjectDirs {
    fn from_env() -> Option<ProjectDirs> {
        Self::resolve(env::var_os("TEXTFORGE_CONFIG_DIR"), platform_config_home)
    }

    fn resolve<F>(override_dir: Option<OsString>, config_home: F) -> Option<ProjectDirs>
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        let config_dir = match override_dir.filter(|dir| !dir.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => config_home()?.join(APP_DIR),
        };
        Some(ProjectDirs { config_dir })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }
}

#[cfg(target_os = "macos")]
fn platform_config_home() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| dirs_next::home_dir().map(|d| d.join(".config")))
}

#[cfg(not(target_os = "macos"))]
fn platform_config_home() -> Option<PathBuf> {
    dirs_next::config_dir()
}

/// `None` when no home directory can be determined
pub static PROJECT_DIRS: Lazy<Option<ProjectDirs>> = Lazy::new(ProjectDirs::from_env);
