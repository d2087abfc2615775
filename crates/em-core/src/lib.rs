//! em-core - Core library for Edamap
//!
//! This crate provides the shared domain types (catalog, mappings, employee
//! rows), configuration parsing, the row diff engine, grid validation,
//! insights, and the mapping session state machine used by every other
//! Edamap crate.

pub mod catalog;
pub mod config;
pub mod diff;
pub mod employee;
pub mod error;
pub mod ids;
pub mod insights;
pub mod mapping;
mod newtype_string;
pub(crate) mod serde_helpers;
pub mod session;
pub mod sql_utils;
pub mod validation;
pub mod value;

pub use catalog::{Project, SourceDatabase, SourceSchema, SourceSystem, SourceTable, TableRef};
pub use config::{Config, DatabaseConfig, DbType, DynamicTableConfig};
pub use diff::{diff_rows, Diffable, RowDiff, RowUpdate};
pub use employee::EmployeeRow;
pub use error::{CoreError, CoreResult};
pub use ids::{
    DatabaseId, EmployeeId, MappingColumnId, MappingId, ProjectId, SchemaId, SystemId, TableId,
};
pub use insights::Insights;
pub use mapping::{
    plan_column_changes, ColumnChange, ColumnMapping, Mapping, ObjectType, ValueTranslation,
};
pub use session::{Action, Page, SessionState};
pub use validation::{validate_rows, RowError, RowProblem};
pub use value::{SqlValue, Statement};
