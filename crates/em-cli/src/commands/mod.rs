//! CLI command implementations

pub(crate) mod catalog;
pub(crate) mod common;
pub(crate) mod employees;
pub(crate) mod grid;
pub(crate) mod init;
pub(crate) mod mapping;
pub(crate) mod select;
