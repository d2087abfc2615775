//! Catalog command implementation - lists catalog entities

use anyhow::{Context, Result};
use em_core::{DatabaseId, SchemaId, SystemId};
use em_db::catalog_store;

use crate::cli::{CatalogArgs, CatalogCommand, GlobalArgs, OutputFormat};
use crate::commands::common::{cell, print_json, print_table};
use crate::context::RuntimeContext;

/// Execute the catalog command
pub(crate) async fn execute(args: &CatalogArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let session = ctx.session()?;
    let db = ctx.db();

    match &args.command {
        CatalogCommand::Projects => {
            let projects = catalog_store::projects(db).await?;
            render(args.output, &projects, &["ID", "NAME", "DESCRIPTION"], |p| {
                vec![
                    p.id.to_string(),
                    p.name.clone(),
                    cell(p.description.as_deref()),
                ]
            })
        }
        CatalogCommand::Systems => {
            let systems = catalog_store::systems(db).await?;
            render(args.output, &systems, &["ID", "NAME", "DESCRIPTION"], |s| {
                vec![
                    s.id.to_string(),
                    s.name.clone(),
                    cell(s.description.as_deref()),
                ]
            })
        }
        CatalogCommand::Databases { system } => {
            let system_id = parent(system.as_deref(), session.system.as_ref(), "system")?;
            let system_id = SystemId::try_new(system_id).context("System id must not be empty")?;
            let databases = catalog_store::databases(db, &system_id).await?;
            render(args.output, &databases, &["ID", "SYSTEM_ID", "NAME"], |d| {
                vec![d.id.to_string(), d.system_id.to_string(), d.name.clone()]
            })
        }
        CatalogCommand::Schemas { database } => {
            let database_id = parent(database.as_deref(), session.database.as_ref(), "database")?;
            let database_id =
                DatabaseId::try_new(database_id).context("Database id must not be empty")?;
            let schemas = catalog_store::schemas(db, &database_id).await?;
            render(args.output, &schemas, &["SCHEMA_ID", "DATABASE_ID", "NAME"], |s| {
                vec![
                    s.schema_id.to_string(),
                    s.database_id.to_string(),
                    s.name.clone(),
                ]
            })
        }
        CatalogCommand::Tables { schema } => {
            let schema_id = parent(schema.as_deref(), session.schema.as_ref(), "schema")?;
            let schema_id = SchemaId::try_new(schema_id).context("Schema id must not be empty")?;
            let tables = catalog_store::tables(db, &schema_id).await?;
            render(args.output, &tables, &["ID", "SCHEMA_ID", "NAME"], |t| {
                vec![t.id.to_string(), t.schema_id.to_string(), t.name.clone()]
            })
        }
    }
}

/// Parent id from the flag, else from the session.
fn parent<'a, T: AsRef<str>>(
    flag: Option<&'a str>,
    selected: Option<&'a T>,
    what: &str,
) -> Result<&'a str> {
    flag.or(selected.map(|s| s.as_ref())).with_context(|| {
        format!("No {what} selected. Run `em select {what} <ID>` or pass --{what}")
    })
}

fn render<T: serde::Serialize>(
    output: OutputFormat,
    items: &[T],
    headers: &[&str],
    row: impl Fn(&T) -> Vec<String>,
) -> Result<()> {
    match output {
        OutputFormat::Json => print_json(items),
        OutputFormat::Table => {
            if items.is_empty() {
                println!("(no rows)");
            } else {
                let rows: Vec<Vec<String>> = items.iter().map(row).collect();
                print_table(headers, &rows);
            }
            Ok(())
        }
    }
}

