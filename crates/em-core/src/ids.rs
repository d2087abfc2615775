//! Warehouse identifiers.

use crate::newtype_string::define_id;

define_id! {
    /// Identity of a project (`ST_EDA_VW_PROJECTS.ID`).
    pub struct ProjectId;
}

define_id! {
    /// Identity of a source system (`ST_EDA_VW_SYSTEMS.ID`).
    pub struct SystemId;
}

define_id! {
    /// Identity of a source database (`DATABASES.DATABASE_ID`).
    pub struct DatabaseId;
}

define_id! {
    /// Identity of a source schema (`SCHEMAS.SCHEMA_ID`).
    pub struct SchemaId;
}

define_id! {
    /// Identity of a source table (`TABLES.TABLE_ID`).
    pub struct TableId;
}

define_id! {
    /// Identity of a mapping (`MAPPING_MASTER.MAPPING_ID`).
    pub struct MappingId;
}

define_id! {
    /// Identity of a persisted column mapping (`MAPPING_COLUMN.MAPPING_COLUMN_ID`).
    pub struct MappingColumnId;
}

define_id! {
    /// Per-version row identity of an employee (`EMPLOYEES.EMPLOYEE_ID`).
    pub struct EmployeeId;
}
