use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EclipsifyError, Result};
use crate::template::search_path::USER_DIR;

/// What to do when no directory on the search path has an entry's template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTemplatePolicy {
    /// Abort the whole run.
    #[default]
    Fail,
    /// Leave that file out and carry on.
    Skip,
}

/// User-level configuration loaded from `~/.eclipsify/config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Default `-T` value when none is given on the command line.
    pub templates: Option<String>,

    /// Default `--platform`.
    pub platform: Option<String>,

    #[serde(default)]
    pub missing_templates: MissingTemplatePolicy,
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|d| d.join(USER_DIR).join("config.toml"))
}

/// Load user configuration from the home directory.
///
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) => load_config_file(&path),
        None => Ok(None),
    }
}

pub fn load_config_file(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| EclipsifyError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig = toml::from_str(&content).map_err(|e| EclipsifyError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(Some(config))
}
