use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::ChangeSource;

const CONFIG_DIR_NAME: &str = "gitmsg";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_MAX_NAMED_FILES: usize = 3;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const ENV_SOURCE: &str = "GITMSG_SOURCE";
const ENV_MAX_NAMED_FILES: &str = "GITMSG_MAX_NAMED_FILES";
const ENV_LOG: &str = "GITMSG_LOG";

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| AppError::Configuration("no config directory available".to_string()))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// Settings persisted by `gitmsg config init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_named_files: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

/// Log level from `GITMSG_LOG`, then the stored setting, then the default.
pub fn resolve_log_level(
    stored: Option<String>,
    env_lookup: &impl Fn(&str) -> Option<String>,
) -> String {
    env_lookup(ENV_LOG)
        .or(stored)
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Log level for commands that run without a full `AppConfig`.
pub fn configured_log_level() -> AppResult<String> {
    let stored = StoredConfig::load()?;
    Ok(resolve_log_level(stored.log_level, &|key: &str| env::var(key).ok()))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: ChangeSource,
    pub max_named_files: usize,
    pub log_level: String,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(stored, |key| env::var(key).ok(), workspace_hint)
    }

    /// Layer environment overrides on top of stored settings and defaults.
    pub fn resolve(
        stored: StoredConfig,
        env_lookup: impl Fn(&str) -> Option<String>,
        workspace_hint: &Path,
    ) -> AppResult<Self> {
        let source = match env_lookup(ENV_SOURCE).or(stored.source) {
            Some(value) => ChangeSource::from_str(&value).ok_or_else(|| {
                AppError::Configuration(format!(
                    "unknown change source '{value}' (expected staged or status)"
                ))
            })?,
            None => ChangeSource::Staged,
        };

        let max_named_files = match env_lookup(ENV_MAX_NAMED_FILES) {
            Some(value) => value.trim().parse::<usize>().map_err(|_| {
                AppError::Configuration(format!("{ENV_MAX_NAMED_FILES} must be a number, got '{value}'"))
            })?,
            None => stored.max_named_files.unwrap_or(DEFAULT_MAX_NAMED_FILES),
        };

        let log_level = resolve_log_level(stored.log_level, &env_lookup);

        Ok(Self {
            source,
            max_named_files,
            log_level,
            workspace_root: workspace_hint.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_stored_settings() {
        let config = AppConfig::resolve(StoredConfig::default(), no_env, Path::new("/repo")).unwrap();
        assert_eq!(config.source, ChangeSource::Staged);
        assert_eq!(config.max_named_files, DEFAULT_MAX_NAMED_FILES);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.workspace_root, PathBuf::from("/repo"));
    }

    #[test]
    fn env_overrides_stored_settings() {
        let stored = StoredConfig {
            source: Some("staged".to_string()),
            max_named_files: Some(5),
            log_level: Some("info".to_string()),
        };
        let env = HashMap::from([
            (ENV_SOURCE, "status"),
            (ENV_MAX_NAMED_FILES, "1"),
            (ENV_LOG, "debug"),
        ]);
        let lookup = |key: &str| env.get(key).map(|value| value.to_string());

        let config = AppConfig::resolve(stored, lookup, Path::new(".")).unwrap();
        assert_eq!(config.source, ChangeSource::Status);
        assert_eq!(config.max_named_files, 1);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn rejects_bad_values() {
        let stored = StoredConfig {
            source: Some("worktree".to_string()),
            ..StoredConfig::default()
        };
        assert!(matches!(
            AppConfig::resolve(stored, no_env, Path::new(".")),
            Err(AppError::Configuration(_))
        ));

        let lookup = |key: &str| (key == ENV_MAX_NAMED_FILES).then(|| "many".to_string());
        assert!(matches!(
            AppConfig::resolve(StoredConfig::default(), lookup, Path::new(".")),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn log_level_prefers_env_then_stored() {
        let env_debug = |key: &str| (key == ENV_LOG).then(|| "debug".to_string());
        assert_eq!(resolve_log_level(Some("info".to_string()), &env_debug), "debug");
        assert_eq!(resolve_log_level(Some("info".to_string()), &no_env), "info");
        assert_eq!(resolve_log_level(Some(" ".to_string()), &no_env), DEFAULT_LOG_LEVEL);
        assert_eq!(resolve_log_level(None, &no_env), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn stored_config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        assert_eq!(StoredConfig::load_from(&path).unwrap(), StoredConfig::default());

        let stored = StoredConfig {
            source: Some("status".to_string()),
            max_named_files: Some(4),
            log_level: None,
        };
        stored.save_to(&path).unwrap();
        assert_eq!(StoredConfig::load_from(&path).unwrap(), stored);
    }

    #[test]
    fn reports_corrupt_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            StoredConfig::load_from(&path),
            Err(AppError::Configuration(_))
        ));
    }
}
