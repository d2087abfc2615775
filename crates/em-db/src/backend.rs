//! Backend selection from configuration

use crate::duckdb::DuckDbBackend;
use crate::error::DbResult;
use crate::snowflake::SnowflakeBackend;
use crate::traits::Database;
use em_core::config::DatabaseConfig;
use em_core::DbType;
use std::sync::Arc;

/// Open the configured warehouse.
///
/// `path` is the already-resolved DuckDB path. A local DuckDB warehouse is
/// migrated on open.
pub fn open_database(config: &DatabaseConfig, path: &str) -> DbResult<Arc<dyn Database>> {
    match config.db_type {
        DbType::DuckDb => {
            log::debug!("Opening DuckDB warehouse at {path}");
            Ok(Arc::new(DuckDbBackend::open_migrated(path)?))
        }
        DbType::Snowflake => Ok(Arc::new(SnowflakeBackend::connect(config)?)),
    }
}

/// Load the demo catalog, mapping and employees.
pub async fn load_sample_data(db: &dyn Database) -> DbResult<()> {
    log::info!("Loading sample data");
    db.execute_batch(crate::ddl::SAMPLE_DATA).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    #[test]
    fn test_open_duckdb_in_memory() {
        let config = DatabaseConfig::default();
        let db = open_database(&config, ":memory:").unwrap();
        assert_eq!(db.db_type(), DbType::DuckDb);
    }

    #[test]
    fn test_snowflake_is_not_implemented() {
        let config = DatabaseConfig {
            db_type: DbType::Snowflake,
            path: String::new(),
        };
        let err = open_database(&config, "").err().unwrap();
        assert!(matches!(err, DbError::NotImplemented { .. }));
        assert!(err.to_string().starts_with("[D005]"));
    }
}
