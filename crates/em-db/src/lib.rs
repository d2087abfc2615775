//! em-db - Warehouse layer for Edamap
//!
//! This crate provides the async `Database` trait with a DuckDB backend (and
//! a Snowflake stub), the embedded migrations that bootstrap a local
//! warehouse, typed stores for the catalog, mappings and employees, and the
//! versioned employee write-back transaction.

pub mod backend;
pub mod catalog_store;
pub mod ddl;
pub mod duckdb;
pub mod employee_store;
pub mod error;
pub mod mapping_store;
pub mod migration;
pub mod rows;
pub(crate) mod snowflake;
pub mod traits;
pub mod writeback;

pub use backend::{load_sample_data, open_database};
pub use self::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use rows::{Row, RowSet};
pub use traits::Database;
pub use writeback::{archive_employee, save_employees, WriteCounts, WriteError};
