//! em-sql - SQL layer for Edamap
//!
//! This crate builds every SQL statement Edamap issues: the translation-aware
//! `CREATE OR REPLACE` preview for a mapping, the versioned write-back
//! statements for employee rows, and the mapping procedures. Generated
//! SELECT bodies can be checked with sqlparser-rs using the warehouse
//! dialect.

pub mod dialect;
pub mod error;
pub mod parser;
pub mod preview;
pub mod procedure;
pub mod validator;
pub mod writeback;

pub use dialect::{DuckDbDialect, SnowflakeDialect, SqlDialect};
pub use error::{GenerateError, SqlError, SqlResult};
pub use parser::SqlParser;
pub use preview::{generate_preview, PreviewSql};
pub use procedure::MappingProcedure;
pub use validator::{validate_select, SelectSummary};
