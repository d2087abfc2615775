//! Select and show commands - drive the persisted mapping session

use anyhow::Result;
use em_core::{Action, Page, SessionState};
use em_db::{catalog_store, mapping_store, Database};
use std::str::FromStr;

use crate::cli::{GlobalArgs, SelectArgs, SelectCommand};
use crate::context::RuntimeContext;

/// Execute the select command
pub(crate) async fn execute(args: &SelectArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let session = ctx.session()?;

    let action = action_for(&args.command)?;
    let next = session.apply(action.clone())?;
    verify_selection(ctx.db(), &next, &action).await?;

    ctx.save_session(&next)?;
    print_state(&next);
    Ok(())
}

/// Execute the show command
pub(crate) async fn show(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    print_state(&ctx.session()?);
    Ok(())
}

fn action_for(command: &SelectCommand) -> Result<Action> {
    fn id<T: FromStr<Err = String>>(raw: &str) -> Result<T> {
        raw.parse().map_err(anyhow::Error::msg)
    }

    Ok(match command {
        SelectCommand::Project { id: raw } => Action::SelectProject(id(raw)?),
        SelectCommand::System { id: raw } => Action::SelectSystem(id(raw)?),
        SelectCommand::Database { id: raw } => Action::SelectDatabase(id(raw)?),
        SelectCommand::Schema { id: raw } => Action::SelectSchema(id(raw)?),
        SelectCommand::Table { id: raw } => Action::SelectTable(id(raw)?),
        SelectCommand::Mapping { id: raw } => Action::SelectMapping(id(raw)?),
        SelectCommand::Column { id: raw } => Action::SelectColumn(id(raw)?),
        SelectCommand::Back => Action::ClearMapping,
        SelectCommand::Reset => Action::ResetFilters,
    })
}

/// Check that the newly selected id exists under its parent selection.
async fn verify_selection(db: &dyn Database, next: &SessionState, action: &Action) -> Result<()> {
    let found = match action {
        Action::SelectProject(id) => catalog_store::projects(db)
            .await?
            .iter()
            .any(|p| &p.id == id),
        Action::SelectSystem(id) => catalog_store::systems(db)
            .await?
            .iter()
            .any(|s| &s.id == id),
        Action::SelectDatabase(id) => match &next.system {
            Some(system) => catalog_store::databases(db, system)
                .await?
                .iter()
                .any(|d| &d.id == id),
            None => false,
        },
        Action::SelectSchema(id) => match &next.database {
            Some(database) => catalog_store::schemas(db, database)
                .await?
                .iter()
                .any(|s| &s.schema_id == id),
            None => false,
        },
        Action::SelectTable(id) => match &next.schema {
            Some(schema) => catalog_store::tables(db, schema)
                .await?
                .iter()
                .any(|t| &t.id == id),
            None => false,
        },
        Action::SelectMapping(id) => match mapping_store::get_mapping(db, id).await? {
            Some(mapping) => {
                if next.project.as_ref() != Some(&mapping.project_id) {
                    anyhow::bail!(
                        "Mapping {id} belongs to project {}, not the selected project",
                        mapping.project_id
                    );
                }
                true
            }
            None => false,
        },
        Action::SelectColumn(id) => match &next.mapping {
            Some(mapping) => mapping_store::column_grid(db, mapping)
                .await?
                .iter()
                .any(|c| c.mapping_column_id.as_ref() == Some(id)),
            None => false,
        },
        _ => true,
    };

    if !found {
        anyhow::bail!("Cannot {action}: not found in the current selection");
    }
    Ok(())
}

fn print_state(state: &SessionState) {
    let show = |label: &str, value: Option<&str>| {
        println!("{label:<9} {}", value.unwrap_or("-"));
    };
    show("project", state.project.as_deref());
    show("system", state.system.as_deref());
    show("database", state.database.as_deref());
    show("schema", state.schema.as_deref());
    show("table", state.table.as_deref());
    let mapping = state.mapping.as_ref().map(|id| {
        if state.mapping_is_new {
            format!("{id} (new)")
        } else {
            id.to_string()
        }
    });
    show("mapping", mapping.as_deref());
    show("column", state.column.as_deref());
    if state.dirty {
        println!("unsaved   column grid exported but not saved");
    }

    println!("\npage: {}", state.page());
    match state.page() {
        Page::Filters => println!("next: em select project <ID>"),
        Page::MappingList => {
            println!("next: em mapping list, or em mapping create once a table is selected")
        }
        Page::MappingDetail => println!("next: em mapping columns, em mapping preview"),
    }
}
