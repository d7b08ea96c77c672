//! Persisted session state with XDG path support.
//!
//! The pipeline only needs three values to survive between sessions: the sort
//! configuration, the single saved preset and the dark-mode flag. They are
//! read once at startup and written on change through the [`StatePort`]
//! trait, so the controller never touches the filesystem directly.
//!
//! [`StateStore`] keeps the state as JSON at `~/.local/share/opp/state.json`;
//! [`MemoryStatePort`] keeps it in memory for tests and one-shot commands.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use opptrack_model::models::{Preset, SortConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default state filename.
const STATE_FILENAME: &str = "state.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "opp";

/// Errors that can occur during state storage operations.
#[derive(Debug, Error)]
pub enum StateStoreError {
    /// Failed to determine the XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read state file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write state file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create state directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file delete.
    #[error("failed to delete state file '{path}': {source}")]
    DeleteError {
        /// The path that failed to delete.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for state store operations.
pub type Result<T> = std::result::Result<T, StateStoreError>;

/// Values that outlive a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    /// Sort configuration of the list view.
    pub sort: SortConfig,
    /// The single saved preset, if any.
    pub preset: Option<Preset>,
    /// Whether the dark theme is active.
    pub dark_mode: bool,
}

/// Narrow interface to wherever persisted state lives.
pub trait StatePort {
    /// Reads the persisted state. A missing store yields the defaults.
    fn load(&self) -> Result<PersistedState>;

    /// Replaces the persisted state.
    fn save(&mut self, state: &PersistedState) -> Result<()>;
}

/// In-memory [`StatePort`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStatePort {
    state: Option<PersistedState>,
    saves: usize,
}

impl MemoryStatePort {
    /// Creates an empty port.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a port that already holds `state`.
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: Some(state),
            saves: 0,
        }
    }

    /// Returns the last saved state.
    pub fn state(&self) -> Option<&PersistedState> {
        self.state.as_ref()
    }

    /// Number of times [`StatePort::save`] was called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl StatePort for MemoryStatePort {
    fn load(&self) -> Result<PersistedState> {
        Ok(self.state.clone().unwrap_or_default())
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        self.state = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}

/// File-backed [`StatePort`].
///
/// On Unix systems the state is stored at `~/.local/share/opp/state.json`.
/// File operations are not synchronized; the CLI owns a single store per
/// process.
///
/// # Example
///
/// ```no_run
/// use opptrack_query::{StatePort, StateStore};
///
/// let mut store = StateStore::new()?;
/// let mut state = store.load()?;
/// state.dark_mode = true;
/// store.save(&state)?;
/// # Ok::<(), opptrack_query::StateStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Creates a store at the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a store with a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default XDG path for the state file.
    ///
    /// On Unix: `~/.local/share/opp/state.json`
    /// On macOS: `~/Library/Application Support/opp/state.json`
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(StateStoreError::NoDataDir)?;
        Ok(project_dirs.data_dir().join(STATE_FILENAME))
    }

    /// Returns the path to the state file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Reads the state file.
    ///
    /// # Errors
    ///
    /// - Returns `StateStoreError::ReadError` if the file cannot be read,
    ///   including when it does not exist.
    /// - Returns `StateStoreError::Json` if the file contains invalid JSON.
    pub fn read(&self) -> Result<PersistedState> {
        let contents = fs::read_to_string(&self.path).map_err(|e| StateStoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Reads the state file, returning defaults if it doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `StateStoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `StateStoreError::Json` if the file contains invalid JSON.
    pub fn read_or_default(&self) -> Result<PersistedState> {
        match self.read() {
            Ok(state) => Ok(state),
            Err(StateStoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(PersistedState::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Writes the state file atomically.
    ///
    /// Creates the parent directory if it doesn't exist, writes pretty-printed
    /// JSON to a temporary file and renames it over the target.
    ///
    /// # Errors
    ///
    /// - Returns `StateStoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `StateStoreError::WriteError` if the file cannot be written.
    /// - Returns `StateStoreError::Json` if serialization fails.
    pub fn write(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StateStoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(state)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| StateStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| StateStoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }

    /// Returns true if the state file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Deletes the state file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError::DeleteError` if the file cannot be deleted.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StateStoreError::DeleteError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

impl StatePort for StateStore {
    fn load(&self) -> Result<PersistedState> {
        self.read_or_default()
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        self.write(state)
    }
}
