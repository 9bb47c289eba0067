use std::fs;
use std::path::{Path, PathBuf};

use super::traits::{ObjectId, RefStore, Repository};
use super::State;
use crate::error::{Error, ErrorContext, Result};
use crate::revwalk::{RevWalk, StateRevWalk};

/// Filesystem-backed repository keeping refs and commit ancestry in `state.yaml`
pub struct FilesystemRepository {
    base_path: PathBuf,
}

impl FilesystemRepository {
    /// Open a repository rooted at `base_path`
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        FilesystemRepository {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Create the directory layout if it doesn't exist yet
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(self.pack_dir())
            .with_context(|| format!("failed to create {}", self.pack_dir().display()))
    }

    /// Get the path to the pack directory
    pub fn pack_dir(&self) -> PathBuf {
        self.base_path.join("objects").join("pack")
    }

    /// Get the path to the state file
    fn state_path(&self) -> PathBuf {
        self.base_path.join("state.yaml")
    }

    /// Read the current state.
    /// Returns default state if none exists.
    pub fn read_state(&self) -> Result<State> {
        let state_path = self.state_path();
        if !state_path.exists() {
            return Ok(State::default());
        }
        let content = fs::read_to_string(&state_path)
            .with_context(|| format!("failed to read {}", state_path.display()))?;
        let state = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", state_path.display()))?;
        Ok(state)
    }

    /// Atomically write new state.
    pub fn write_state(&self, state: &State) -> Result<()> {
        let state_path = self.state_path();
        let temp_path = self.base_path.join(".state.yaml.tmp");

        let yaml = serde_yaml::to_string(state)?;
        fs::create_dir_all(&self.base_path)?;
        fs::write(&temp_path, yaml)?;
        fs::rename(&temp_path, &state_path)?;

        Ok(())
    }
}

impl RefStore for FilesystemRepository {
    fn lookup(&self, name: &str) -> Result<ObjectId> {
        self.read_state()?
            .refs
            .remove(name)
            .ok_or_else(|| Error::not_found(name))
    }

    fn list_all_names(&self) -> Result<Vec<String>> {
        Ok(self.read_state()?.refs.into_keys().collect())
    }
}

impl Repository for FilesystemRepository {
    fn rev_walk(&self) -> Result<Box<dyn RevWalk + '_>> {
        let state = self.read_state()?;
        Ok(Box::new(StateRevWalk::new(state.commits)))
    }

    fn git_dir(&self) -> &Path {
        &self.base_path
    }
}
