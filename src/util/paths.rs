//! Where vows keeps its config and logs

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const DIR_NAME: &str = ".vows";
const LOG_FILE: &str = "vows.log";
const CONFIG_FILE: &str = "config.toml";

static ACTIVE: OnceLock<DataPaths> = OnceLock::new();

/// Layout of the data directory:
///
/// ```text
/// <root>/config.toml
/// <root>/logs/vows.log
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.vows`, or `./.vows` when there is no home directory
    pub fn home() -> Self {
        let root = dirs::home_dir()
            .map(|h| h.join(DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(DIR_NAME));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Create the root and logs directories if they are missing
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(self.logs_dir())
    }

    /// Open the log file for appending, creating directories as needed
    pub fn open_log(&self) -> io::Result<File> {
        self.ensure()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_file())
    }
}

/// Pin the data directory for this process. Call once from `main` before
/// anything reads config; later calls keep the first choice.
pub fn init_data_dir(custom: Option<PathBuf>) -> &'static DataPaths {
    let wanted = custom.map(DataPaths::new).unwrap_or_else(DataPaths::home);
    let active = ACTIVE.get_or_init(|| wanted.clone());
    if *active != wanted {
        tracing::debug!(
            requested = %wanted.root().display(),
            active = %active.root().display(),
            "Data directory already pinned"
        );
    }
    active
}

/// The pinned data directory, falling back to `~/.vows`
pub fn data_paths() -> &'static DataPaths {
    ACTIVE.get_or_init(DataPaths::home)
}
