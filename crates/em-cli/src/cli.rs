//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use em_core::ObjectType;
use std::path::PathBuf;

/// Edamap - source-to-target mapping and employee write-back for the warehouse
#[derive(Parser, Debug)]
#[command(name = "em")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override target (warehouse path)
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write edamap.yml and bootstrap the local warehouse
    Init(InitArgs),

    /// Browse projects, systems, databases, schemas and tables
    Catalog(CatalogArgs),

    /// Change the current selection
    Select(SelectArgs),

    /// Show the current selection
    Show,

    /// Create, edit and preview mappings
    Mapping(MappingArgs),

    /// Edit the employee reference table
    Employees(EmployeesArgs),
}

/// Output formats for listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name written to edamap.yml (default: directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Load the demo catalog, mapping and employees
    #[arg(long)]
    pub sample_data: bool,
}

/// Arguments for the catalog command
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List projects
    Projects,

    /// List source systems
    Systems,

    /// List databases of a system (default: selected system)
    Databases {
        #[arg(long)]
        system: Option<String>,
    },

    /// List schemas of a database (default: selected database)
    Schemas {
        #[arg(long)]
        database: Option<String>,
    },

    /// List tables of a schema (default: selected schema)
    Tables {
        #[arg(long)]
        schema: Option<String>,
    },
}

/// Arguments for the select command
#[derive(Args, Debug)]
pub struct SelectArgs {
    #[command(subcommand)]
    pub command: SelectCommand,
}

#[derive(Subcommand, Debug)]
pub enum SelectCommand {
    /// Select a project (clears everything else when it changes)
    Project { id: String },

    /// Select a source system
    System { id: String },

    /// Select a database of the selected system
    Database { id: String },

    /// Select a schema of the selected database
    Schema { id: String },

    /// Select a table of the selected schema
    Table { id: String },

    /// Select a mapping of the selected project
    Mapping { id: String },

    /// Select a saved column mapping of the selected mapping
    Column { id: String },

    /// Leave the selected mapping and return to the mapping list
    Back,

    /// Clear every selection except the project
    Reset,
}

/// Arguments for the mapping command
#[derive(Args, Debug)]
pub struct MappingArgs {
    #[command(subcommand)]
    pub command: MappingCommand,
}

#[derive(Subcommand, Debug)]
pub enum MappingCommand {
    /// List mappings of the selected project
    List {
        /// Include mappings of every table, not only the selected one
        #[arg(long)]
        all_tables: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// Create a mapping for the selected table and select it
    Create,

    /// Save the target of a mapping
    SetTarget {
        #[command(flatten)]
        mapping: MappingSelector,

        /// Target database
        #[arg(long)]
        database: String,

        /// Target schema
        #[arg(long)]
        schema: String,

        /// Target object name
        #[arg(long)]
        object: String,

        /// Target object type: view or dynamic-table
        #[arg(long = "type", value_parser = parse_object_type, default_value = "view")]
        object_type: ObjectType,
    },

    /// Show the column-mapping grid, or write it to a CSV file
    Columns {
        #[command(flatten)]
        mapping: MappingSelector,

        /// Write the grid to this CSV file for editing
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Save an edited column-mapping grid
    SaveColumns {
        #[command(flatten)]
        mapping: MappingSelector,

        /// Edited CSV grid
        file: PathBuf,
    },

    /// Show the value translations of a column, or write them to a CSV file
    Values {
        #[command(flatten)]
        column: ColumnSelector,

        /// Write the translations to this CSV file for editing
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace the value translations of a column from a CSV file
    SaveValues {
        #[command(flatten)]
        column: ColumnSelector,

        /// Edited CSV file with FROMVALUE and TOVALUE columns
        file: PathBuf,
    },

    /// Print the SQL that would materialize a mapping
    Preview {
        #[command(flatten)]
        mapping: MappingSelector,

        /// Parse the generated SELECT with the warehouse dialect
        #[arg(long)]
        validate: bool,

        /// Also write the statement to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Mapping to operate on (default: selected mapping)
#[derive(Args, Debug, Clone)]
pub struct MappingSelector {
    /// Mapping id
    #[arg(short, long = "mapping")]
    pub mapping_id: Option<String>,
}

/// Column mapping to operate on (default: selected column)
#[derive(Args, Debug, Clone)]
pub struct ColumnSelector {
    /// Column mapping id
    #[arg(long = "column")]
    pub column_id: Option<String>,
}

/// Arguments for the employees command
#[derive(Args, Debug)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Subcommand, Debug)]
pub enum EmployeesCommand {
    /// Write the current employees to a CSV grid plus a snapshot
    Export {
        /// CSV grid path
        #[arg(default_value = "employees.csv")]
        file: PathBuf,
    },

    /// Save an edited grid against its snapshot
    Save {
        /// CSV grid path
        #[arg(default_value = "employees.csv")]
        file: PathBuf,
    },

    /// Archive one employee
    Delete {
        /// EMPLOYEE_ID of the current version
        employee_id: String,
    },

    /// Headcount, locations and skills of current employees
    Insights {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
}

fn parse_object_type(raw: &str) -> Result<ObjectType, String> {
    raw.parse().map_err(|e: em_core::CoreError| e.to_string())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
