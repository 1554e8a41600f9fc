//! Configuration file location.

use crate::constants::{APP_NAME, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Platform configuration directory, e.g. `~/.config/mrs-merge/` on Linux.
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Default config file path inside [`config_dir`].
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Config file to use: `explicit` when given (`--config`), the platform
/// default otherwise.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    explicit.map_or_else(config_file_path, |path| Ok(path.to_path_buf()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_is_app_scoped() {
        let path = config_file_path().unwrap();
        assert!(path.to_string_lossy().contains(APP_NAME));
        assert!(path.ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_config_path(Some(Path::new("cohort.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("cohort.toml"));
        assert_eq!(resolve_config_path(None).unwrap(), config_file_path().unwrap());
    }
}
