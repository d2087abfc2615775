//! Init command implementation - writes edamap.yml and bootstraps the warehouse

use anyhow::{Context, Result};
use em_core::Config;
use em_db::{catalog_store, load_sample_data};
use std::path::{Path, PathBuf};

use crate::cli::{GlobalArgs, InitArgs};
use crate::context::{load_config, RuntimeContext};

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs, global: &GlobalArgs) -> Result<()> {
    let root = PathBuf::from(&global.project_dir);
    std::fs::create_dir_all(&root)
        .with_context(|| format!("Failed to create directory: {}", root.display()))?;

    let config = if global.config.is_some() || has_config(&root) {
        let config = load_config(global, &root)?;
        println!("Using existing configuration for '{}'", config.name);
        config
    } else {
        let name = match &args.name {
            Some(name) => name.clone(),
            None => default_name(&root),
        };
        let config = Config::starter(&name);
        let path = config
            .write_to_dir(&root)
            .context("Failed to write edamap.yml")?;
        println!("Created {}", path.display());
        config
    };

    let ctx = RuntimeContext::with_config(global, root, config)?;
    println!(
        "Warehouse ready ({}: {})",
        ctx.db().db_type(),
        ctx.config.database_config(global.target.as_deref()).path
    );

    if args.sample_data {
        let existing = catalog_store::projects(ctx.db()).await?;
        if existing.is_empty() {
            load_sample_data(ctx.db())
                .await
                .context("Failed to load sample data")?;
            println!("Loaded sample data");
        } else {
            println!("Sample data skipped: the warehouse already has projects");
        }
    }

    println!("\nNext: em catalog projects");
    Ok(())
}

fn has_config(root: &Path) -> bool {
    root.join("edamap.yml").exists() || root.join("edamap.yaml").exists()
}

/// Project name from the directory name, falling back to "edamap".
fn default_name(root: &Path) -> String {
    std::fs::canonicalize(root)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "edamap".to_string())
}
