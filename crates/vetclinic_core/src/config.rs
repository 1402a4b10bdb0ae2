//! Process configuration for the clinic core.
//!
//! Values start from built-in defaults and are overridden by environment
//! variables. Blank variables count as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "VETCLINIC_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "VETCLINIC_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "VETCLINIC_LOG_DIR";

const DEFAULT_DB_FILE: &str = "vetclinic.sqlite3";
const DEFAULT_LOG_SUBDIR: &str = "vetclinic-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            log_level: default_log_level().to_string(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_SUBDIR),
        }
    }
}

impl CoreConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();
        if let Some(db_path) = value(DB_PATH_VAR) {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = value(LOG_LEVEL_VAR) {
            config.log_level = level;
        }
        if let Some(log_dir) = value(LOG_DIR_VAR) {
            config.log_dir = PathBuf::from(log_dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = CoreConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.db_path, PathBuf::from("vetclinic.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn environment_overrides_every_field() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/var/lib/vetclinic/clinic.db"),
            (LOG_LEVEL_VAR, "warn"),
            (LOG_DIR_VAR, "/var/log/vetclinic"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/var/lib/vetclinic/clinic.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/vetclinic"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = CoreConfig::from_lookup(lookup_from(&[(LOG_LEVEL_VAR, "   ")]));
        assert_eq!(config.log_level, default_log_level());
    }
}
