//! Configuration types and parsing for edamap.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main project configuration from edamap.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Warehouse connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// User recorded in UPDATE_USER / DELETE_USER on write-back
    #[serde(default = "default_actor")]
    pub actor: String,

    /// Extra clauses for generated dynamic tables
    #[serde(default)]
    pub dynamic_table: Option<DynamicTableConfig>,

    /// Where the mapping session is persisted, relative to the project dir
    #[serde(default = "default_session_path")]
    pub session_path: String,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
    /// Snowflake
    Snowflake,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
            DbType::Snowflake => write!(f, "snowflake"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type (duckdb or snowflake)
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database path (for DuckDB file-based or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

/// `TARGET_LAG` / `WAREHOUSE` for `CREATE DYNAMIC TABLE`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DynamicTableConfig {
    #[serde(default)]
    pub target_lag: Option<String>,

    #[serde(default)]
    pub warehouse: Option<String>,
}

const CONFIG_FILE_YML: &str = "edamap.yml";
const CONFIG_FILE_YAML: &str = "edamap.yaml";
const DEFAULT_DB_PATH: &str = "warehouse.duckdb";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_actor() -> String {
    "edamap".to_string()
}

fn default_session_path() -> String {
    ".em/session.json".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded configuration '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Load configuration from a project directory
    ///
    /// Looks for edamap.yml or edamap.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join(CONFIG_FILE_YML);
        let yaml_path = dir.join(CONFIG_FILE_YAML);

        if yml_path.exists() {
            if yaml_path.exists() {
                log::warn!(
                    "Both {CONFIG_FILE_YML} and {CONFIG_FILE_YAML} exist in {}; using {CONFIG_FILE_YML}",
                    dir.display()
                );
            }
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Default configuration written by `em init`
    pub fn starter(name: &str) -> Self {
        Self {
            name: name.to_string(),
            database: DatabaseConfig::default(),
            actor: default_actor(),
            dynamic_table: None,
            session_path: default_session_path(),
        }
    }

    /// Serialize to YAML and write to `dir/edamap.yml`
    pub fn write_to_dir(&self, dir: &Path) -> CoreResult<PathBuf> {
        let path = dir.join(CONFIG_FILE_YML);
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(path)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }
        if self.actor.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "actor cannot be empty".to_string(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Database config with an optional path override (`--target`)
    pub fn database_config(&self, path_override: Option<&str>) -> DatabaseConfig {
        let mut db = self.database.clone();
        if let Some(path) = path_override {
            db.path = path.to_string();
        }
        db
    }

    /// Resolve a DuckDB path against the project root.
    ///
    /// `:memory:` and absolute paths are returned unchanged.
    pub fn resolve_db_path(db: &DatabaseConfig, root: &Path) -> String {
        if db.path == ":memory:" || Path::new(&db.path).is_absolute() {
            db.path.clone()
        } else {
            root.join(&db.path).display().to_string()
        }
    }

    /// Absolute path of the session file
    pub fn session_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.session_path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
