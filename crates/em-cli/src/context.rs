//! Runtime context for CLI commands

use anyhow::{Context, Result};
use em_core::{Action, Config, SessionState};
use em_db::{open_database, Database};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Loaded configuration, warehouse connection and session location
pub(crate) struct RuntimeContext {
    /// Project directory
    pub root: PathBuf,

    /// Parsed edamap.yml
    pub config: Config,

    /// Warehouse connection
    pub db: Arc<dyn Database>,

    /// Where the session state is persisted
    pub session_path: PathBuf,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub(crate) fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);
        let config = load_config(args, &root)?;
        Self::with_config(args, root, config)
    }

    /// Create a runtime context for an already loaded configuration
    pub(crate) fn with_config(args: &GlobalArgs, root: PathBuf, config: Config) -> Result<Self> {
        let db_config = config.database_config(args.target.as_deref());
        let db_path = Config::resolve_db_path(&db_config, &root);
        let db = open_database(&db_config, &db_path)
            .with_context(|| format!("Failed to open {} warehouse", db_config.db_type))?;
        let session_path = config.session_path_absolute(&root);

        Ok(Self {
            root,
            config,
            db,
            session_path,
        })
    }

    /// Warehouse connection as a trait object
    pub(crate) fn db(&self) -> &dyn Database {
        self.db.as_ref()
    }

    /// Current session state
    pub(crate) fn session(&self) -> Result<SessionState> {
        SessionState::load(&self.session_path).context("Failed to load session state")
    }

    /// Apply an action to the persisted session and save the result
    pub(crate) fn apply(&self, action: Action) -> Result<SessionState> {
        let next = self.session()?.apply(action)?;
        self.save_session(&next)?;
        Ok(next)
    }

    pub(crate) fn save_session(&self, state: &SessionState) -> Result<()> {
        state
            .save(&self.session_path)
            .context("Failed to save session state")
    }
}

/// Load configuration from `--config` or the project directory
pub(crate) fn load_config(args: &GlobalArgs, root: &Path) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load(Path::new(path)).context("Failed to load configuration file"),
        None => Config::load_from_dir(root).context("Failed to load project configuration"),
    }
}
