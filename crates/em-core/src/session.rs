//! Mapping session state.
//!
//! The selection a user has made while browsing the catalog and editing a
//! mapping. Every change goes through [`SessionState::apply`], which takes
//! the current state and an [`Action`] and returns the next state, or an
//! error if the action is not allowed yet. The CLI persists the state as
//! JSON between invocations.

use crate::error::{CoreError, CoreResult};
use crate::ids::{
    DatabaseId, MappingColumnId, MappingId, ProjectId, SchemaId, SystemId, TableId,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Everything the user has currently selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub project: Option<ProjectId>,
    #[serde(default)]
    pub system: Option<SystemId>,
    #[serde(default)]
    pub database: Option<DatabaseId>,
    #[serde(default)]
    pub schema: Option<SchemaId>,
    #[serde(default)]
    pub table: Option<TableId>,
    #[serde(default)]
    pub mapping: Option<MappingId>,
    /// The selected mapping was created in this session.
    #[serde(default)]
    pub mapping_is_new: bool,
    #[serde(default)]
    pub column: Option<MappingColumnId>,
    /// Unsaved edits exist for the selected mapping.
    #[serde(default)]
    pub dirty: bool,
}

/// A user action that changes the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectProject(ProjectId),
    SelectSystem(SystemId),
    SelectDatabase(DatabaseId),
    SelectSchema(SchemaId),
    SelectTable(TableId),
    SelectMapping(MappingId),
    ClearMapping,
    MappingCreated(MappingId),
    SelectColumn(MappingColumnId),
    MarkDirty,
    MarkClean,
    ResetFilters,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::SelectProject(_) => "select project",
            Action::SelectSystem(_) => "select system",
            Action::SelectDatabase(_) => "select database",
            Action::SelectSchema(_) => "select schema",
            Action::SelectTable(_) => "select table",
            Action::SelectMapping(_) => "select mapping",
            Action::ClearMapping => "clear mapping",
            Action::MappingCreated(_) => "record created mapping",
            Action::SelectColumn(_) => "select column",
            Action::MarkDirty => "mark dirty",
            Action::MarkClean => "mark clean",
            Action::ResetFilters => "reset filters",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which page the presentation layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Project and catalog filters.
    Filters,
    /// Mappings of the selected project.
    MappingList,
    /// Column mappings of the selected mapping.
    MappingDetail,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Filters => write!(f, "filters"),
            Page::MappingList => write!(f, "mapping list"),
            Page::MappingDetail => write!(f, "mapping detail"),
        }
    }
}

fn require<T>(value: &Option<T>, action: &Action, what: &str) -> CoreResult<()> {
    match value {
        Some(_) => Ok(()),
        None => Err(CoreError::InvalidTransition {
            action: action.to_string(),
            reason: format!("no {what} selected"),
        }),
    }
}

impl SessionState {
    /// Apply `action` and return the resulting state.
    pub fn apply(&self, action: Action) -> CoreResult<SessionState> {
        let mut next = self.clone();
        match &action {
            Action::SelectProject(id) => {
                if self.project.as_ref() != Some(id) {
                    next = SessionState {
                        project: Some(id.clone()),
                        ..SessionState::default()
                    };
                }
            }
            Action::SelectSystem(id) => {
                require(&self.project, &action, "project")?;
                next.system = Some(id.clone());
                next.clear_below_system();
            }
            Action::SelectDatabase(id) => {
                require(&self.system, &action, "system")?;
                next.database = Some(id.clone());
                next.clear_below_database();
            }
            Action::SelectSchema(id) => {
                require(&self.database, &action, "database")?;
                next.schema = Some(id.clone());
                next.clear_below_schema();
            }
            Action::SelectTable(id) => {
                require(&self.schema, &action, "schema")?;
                next.table = Some(id.clone());
                next.clear_mapping();
            }
            Action::SelectMapping(id) => {
                require(&self.project, &action, "project")?;
                next.clear_mapping();
                next.mapping = Some(id.clone());
            }
            Action::ClearMapping => next.clear_mapping(),
            Action::MappingCreated(id) => {
                require(&self.table, &action, "source table")?;
                next.clear_mapping();
                next.mapping = Some(id.clone());
                next.mapping_is_new = true;
            }
            Action::SelectColumn(id) => {
                require(&self.mapping, &action, "mapping")?;
                next.column = Some(id.clone());
            }
            Action::MarkDirty => {
                require(&self.mapping, &action, "mapping")?;
                next.dirty = true;
            }
            Action::MarkClean => next.dirty = false,
            Action::ResetFilters => {
                next = SessionState {
                    project: self.project.clone(),
                    ..SessionState::default()
                };
            }
        }
        Ok(next)
    }

    /// The page to show for this state.
    pub fn page(&self) -> Page {
        if self.mapping.is_some() {
            Page::MappingDetail
        } else if self.project.is_some() {
            Page::MappingList
        } else {
            Page::Filters
        }
    }

    fn clear_below_system(&mut self) {
        self.database = None;
        self.clear_below_database();
    }

    fn clear_below_database(&mut self) {
        self.schema = None;
        self.clear_below_schema();
    }

    fn clear_below_schema(&mut self) {
        self.table = None;
        self.clear_mapping();
    }

    fn clear_mapping(&mut self) {
        self.mapping = None;
        self.mapping_is_new = false;
        self.column = None;
        self.dirty = false;
    }

    /// Load a persisted session, or an empty one if the file does not exist.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist the session, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let io_err = |e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
