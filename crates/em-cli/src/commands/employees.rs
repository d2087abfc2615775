//! Employees command implementation - grid export, write-back and insights

use anyhow::{Context, Result};
use em_core::Insights;
use em_db::{archive_employee, employee_store, save_employees, WriteError};

use crate::cli::{EmployeesArgs, EmployeesCommand, GlobalArgs, OutputFormat};
use crate::commands::common::{bar_chart, print_json, ExitCode};
use crate::commands::grid;
use crate::context::RuntimeContext;

/// Execute the employees command
pub(crate) async fn execute(args: &EmployeesArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let db = ctx.db();

    match &args.command {
        EmployeesCommand::Export { file } => {
            let rows = employee_store::load_current(db).await?;
            grid::export_employees(file, &rows)?;
            println!("Exported {} employee(s) to {}", rows.len(), file.display());
            println!("Edit it, then run `em employees save {}`", file.display());
            Ok(())
        }
        EmployeesCommand::Save { file } => {
            let (original, edited) = grid::read_employees(file)?;
            let counts = match save_employees(db, &original, &edited, &ctx.config.actor).await {
                Ok(counts) => counts,
                Err(WriteError::Validation(errors)) => {
                    eprintln!("Nothing was saved; fix these rows and retry:");
                    for error in &errors {
                        eprintln!("  {error}");
                    }
                    return Err(ExitCode(1).into());
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to save {}", file.display()))
                }
            };

            if counts.is_empty() {
                println!("No changes to save");
                return Ok(());
            }
            println!(
                "Saved: {} deleted, {} updated, {} inserted",
                counts.deleted, counts.updated, counts.inserted
            );

            let rows = employee_store::load_current(db).await?;
            grid::export_employees(file, &rows)?;
            println!("Reloaded {} employee(s) into {}", rows.len(), file.display());
            Ok(())
        }
        EmployeesCommand::Delete { employee_id } => {
            let rows = employee_store::load_current(db).await?;
            let row = rows
                .iter()
                .find(|r| r.employee_id.as_deref() == Some(employee_id.trim()))
                .with_context(|| format!("No current employee with EMPLOYEE_ID {employee_id}"))?;
            archive_employee(db, row, &ctx.config.actor)
                .await
                .with_context(|| format!("Failed to delete employee {employee_id}"))?;
            println!(
                "Deleted {} {} ({employee_id})",
                row.first_name, row.last_name
            );
            Ok(())
        }
        EmployeesCommand::Insights { output } => {
            let rows = employee_store::load_current(db).await?;
            let insights = Insights::from_rows(&rows);
            match output {
                OutputFormat::Json => print_json(&insights),
                OutputFormat::Table => {
                    println!("Employees  {}", insights.employees);
                    println!("Active     {}", insights.active);
                    println!("Locations  {}", insights.locations);
                    println!();
                    print!("{}", bar_chart("By location", &insights.by_location));
                    println!();
                    print!("{}", bar_chart("By skill", &insights.by_skill));
                    Ok(())
                }
            }
        }
    }
}
