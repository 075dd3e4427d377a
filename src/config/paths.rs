//! Platform-specific configuration paths.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File name of the kit configuration inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory for the current platform.
///
/// - Linux: `~/.config/kitcheck/`
/// - macOS: `~/Library/Application Support/kitcheck/`
/// - Windows: `%APPDATA%\kitcheck\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Full path to the platform config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Config file to use: an explicit `--config` path wins over the platform one.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    explicit.map_or_else(config_file_path, |p| Ok(p.to_path_buf()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_path_is_under_app_dir() {
        let path = config_file_path().unwrap();
        assert!(path.to_string_lossy().contains(APP_NAME));
        assert!(path.ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = Path::new("/tmp/custom-kit.toml");
        let resolved = resolve_config_path(Some(explicit)).unwrap();
        assert_eq!(resolved, explicit);
    }
}
