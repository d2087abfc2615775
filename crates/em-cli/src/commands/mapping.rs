//! Mapping command implementation - mappings, column grids, translations, preview

use anyhow::{Context, Result};
use em_core::{Action, MappingId};
use em_db::mapping_store::{self, MappingTarget};
use em_sql::validate_select;
use std::path::Path;

use crate::cli::{GlobalArgs, MappingArgs, MappingCommand, OutputFormat};
use crate::commands::common::{cell, print_json, print_table, resolve_column, resolve_mapping};
use crate::commands::grid;
use crate::context::RuntimeContext;

/// Execute the mapping command
pub(crate) async fn execute(args: &MappingArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    match &args.command {
        MappingCommand::List { all_tables, output } => list(&ctx, *all_tables, *output).await,
        MappingCommand::Create => create(&ctx).await,
        MappingCommand::SetTarget {
            mapping,
            database,
            schema,
            object,
            object_type,
        } => {
            let mapping_id = resolve_mapping(mapping, &ctx.session()?)?;
            let target = MappingTarget {
                database: database.clone(),
                schema: schema.clone(),
                object: object.clone(),
                object_type: *object_type,
            };
            mapping_store::set_target(ctx.db(), &mapping_id, &target).await?;
            mark_clean_if_selected(&ctx, &mapping_id)?;
            println!(
                "Mapping {mapping_id} now targets {} {}.{}.{}",
                target.object_type, target.database, target.schema, target.object
            );
            Ok(())
        }
        MappingCommand::Columns { mapping, out } => {
            let session = ctx.session()?;
            let mapping_id = resolve_mapping(mapping, &session)?;
            let columns = mapping_store::column_grid(ctx.db(), &mapping_id).await?;

            match out {
                Some(path) => {
                    grid::write_columns(path, &columns)?;
                    if session.mapping.as_ref() == Some(&mapping_id) {
                        ctx.apply(Action::MarkDirty)?;
                    }
                    println!(
                        "Wrote {} column(s) of mapping {mapping_id} to {}",
                        columns.len(),
                        path.display()
                    );
                    println!("Edit it, then run `em mapping save-columns {}`", path.display());
                }
                None => {
                    let rows: Vec<Vec<String>> = columns
                        .iter()
                        .map(|c| {
                            vec![
                                cell(c.mapping_column_id.as_deref()),
                                if c.is_mapped { "Y" } else { "N" }.to_string(),
                                c.source_column.clone(),
                                c.target_column.clone(),
                                c.description.clone(),
                            ]
                        })
                        .collect();
                    print_table(grid::COLUMN_GRID_HEADERS, &rows);
                }
            }
            Ok(())
        }
        MappingCommand::SaveColumns { mapping, file } => {
            let mapping_id = resolve_mapping(mapping, &ctx.session()?)?;
            let rows = grid::read_columns(file)?;
            let counts = mapping_store::save_columns(ctx.db(), &mapping_id, &rows)
                .await
                .with_context(|| format!("Failed to save column mappings of {mapping_id}"))?;
            mark_clean_if_selected(&ctx, &mapping_id)?;
            println!(
                "Saved mapping {mapping_id}: {} inserted, {} updated, {} deleted",
                counts.inserted, counts.updated, counts.deleted
            );
            Ok(())
        }
        MappingCommand::Values { column, out } => {
            let column_id = resolve_column(column, &ctx.session()?)?;
            let translations = mapping_store::column_translations(ctx.db(), &column_id).await?;
            match out {
                Some(path) => {
                    grid::write_translations(path, &translations)?;
                    println!(
                        "Wrote {} translation(s) of column {column_id} to {}",
                        translations.len(),
                        path.display()
                    );
                }
                None => {
                    let rows: Vec<Vec<String>> = translations
                        .iter()
                        .map(|t| {
                            vec![
                                t.mapping_column_id.to_string(),
                                t.from_value.clone(),
                                t.to_value.clone(),
                            ]
                        })
                        .collect();
                    print_table(grid::TRANSLATION_GRID_HEADERS, &rows);
                }
            }
            Ok(())
        }
        MappingCommand::SaveValues { column, file } => {
            let column_id = resolve_column(column, &ctx.session()?)?;
            let translations = grid::read_translations(file, &column_id)?;
            let saved = mapping_store::save_translations(ctx.db(), &column_id, &translations)
                .await
                .with_context(|| format!("Failed to save translations of column {column_id}"))?;
            println!("Saved {saved} translation(s) for column {column_id}");
            Ok(())
        }
        MappingCommand::Preview {
            mapping,
            validate,
            out,
        } => {
            let mapping_id = resolve_mapping(mapping, &ctx.session()?)?;
            preview(&ctx, &mapping_id, *validate, out.as_deref()).await
        }
    }
}

async fn list(ctx: &RuntimeContext, all_tables: bool, output: OutputFormat) -> Result<()> {
    let session = ctx.session()?;
    let project = session
        .project
        .as_ref()
        .context("No project selected. Run `em select project <ID>` first")?;
    let table = if all_tables {
        None
    } else {
        session.table.as_ref()
    };

    let mappings = mapping_store::list_mappings(ctx.db(), project, table).await?;
    match output {
        OutputFormat::Json => print_json(&mappings),
        OutputFormat::Table => {
            if mappings.is_empty() {
                println!("(no mappings)");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = mappings
                .iter()
                .map(|m| {
                    vec![
                        m.mapping_id.to_string(),
                        m.source_table_id.to_string(),
                        cell(m.source.as_deref()),
                        cell(m.target_db.as_deref()),
                        cell(m.target_schema.as_deref()),
                        cell(m.target_object.as_deref()),
                        m.target_type
                            .map_or_else(|| "-".to_string(), |t| t.to_string()),
                    ]
                })
                .collect();
            print_table(
                &["MAPPING_ID", "TABLE_ID", "SOURCE", "TARGETDB", "TARGETSCHEMA", "TARGETOBJECT", "TARGETTYPE"],
                &rows,
            );
            Ok(())
        }
    }
}

async fn create(ctx: &RuntimeContext) -> Result<()> {
    let session = ctx.session()?;
    let project = session
        .project
        .as_ref()
        .context("No project selected. Run `em select project <ID>` first")?;
    let table = session
        .table
        .as_ref()
        .context("No source table selected. Run `em select table <ID>` first")?;

    let mapping_id = mapping_store::create_mapping(ctx.db(), project, table).await?;
    ctx.apply(Action::MappingCreated(mapping_id.clone()))?;
    println!("Created mapping {mapping_id} and selected it");
    println!("Next: em mapping set-target --database <DB> --schema <SCHEMA> --object <NAME>");
    Ok(())
}

async fn preview(
    ctx: &RuntimeContext,
    mapping_id: &MappingId,
    validate: bool,
    out: Option<&Path>,
) -> Result<()> {
    let preview = mapping_store::preview(ctx.db(), mapping_id, ctx.config.dynamic_table.as_ref())
        .await
        .with_context(|| format!("Failed to generate preview for mapping {mapping_id}"))?;

    println!("{}", preview.statement);

    if validate {
        let summary = validate_select(&preview.select, ctx.db().db_type())
            .context("Generated SELECT did not parse")?;
        eprintln!(
            "Validated {} {}: {} column(s) from {}",
            preview.object_type,
            mapping_id,
            summary.columns.len(),
            summary.source
        );
    }

    if let Some(path) = out {
        std::fs::write(path, format!("{}\n", preview.statement))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

/// Clear the unsaved marker when `mapping_id` is the selected mapping.
fn mark_clean_if_selected(ctx: &RuntimeContext, mapping_id: &MappingId) -> Result<()> {
    if ctx.session()?.mapping.as_ref() == Some(mapping_id) {
        ctx.apply(Action::MarkClean)?;
    }
    Ok(())
}
