//! Local resource state, keyed by address.
//!
//! The store enforces the resource lifecycle: an address must be unmanaged
//! to be created or imported, and managed to be refreshed, updated or
//! destroyed. Entries only change after the remote call they record has
//! succeeded.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::range::RangeModel;
use crate::sheet::SheetModel;

/// Current state file format.
pub const STATE_VERSION: u32 = 1;

/// Default state file name, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "gsheets.state.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceState {
    Range(RangeModel),
    Sheet(SheetModel),
}

impl ResourceState {
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceState::Range(_) => "range",
            ResourceState::Sheet(_) => "sheet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub resource: ResourceState,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,
    /// Incremented on every save.
    #[serde(default)]
    pub serial: u64,
    #[serde(default)]
    pub resources: BTreeMap<String, StateEntry>,
    #[serde(skip)]
    dirty: bool,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            serial: 0,
            resources: BTreeMap::new(),
            dirty: false,
        }
    }
}

impl StateFile {
    /// Load state from `path`. A missing file is an empty state.
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no state file at {}, starting empty", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(io_error(path, e)),
        };

        let state: StateFile = serde_json::from_str(&text).map_err(|e| StateError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if state.version > STATE_VERSION {
            return Err(StateError::UnsupportedVersion {
                found: state.version,
                supported: STATE_VERSION,
            });
        }
        Ok(state)
    }

    /// Write to a sibling temp file, then rename over `path`.
    pub fn save(&mut self, path: &Path) -> Result<(), StateError> {
        self.serial += 1;
        self.version = STATE_VERSION;
        let json = serde_json::to_string_pretty(self).map_err(|e| StateError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        let tmp = temp_path(path);
        fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| io_error(path, e))?;

        self.dirty = false;
        log::debug!("saved state serial {} to {}", self.serial, path.display());
        Ok(())
    }

    /// True when entries changed since load or the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_managed(&self, address: &str) -> bool {
        self.resources.contains_key(address)
    }

    pub fn get(&self, address: &str) -> Option<&ResourceState> {
        self.resources.get(address).map(|e| &e.resource)
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Range state at `address`, `None` when unmanaged.
    pub fn range(&self, address: &str) -> Result<Option<&RangeModel>, StateError> {
        match self.get(address) {
            None => Ok(None),
            Some(ResourceState::Range(r)) => Ok(Some(r)),
            Some(other) => Err(wrong_type(address, "range", other)),
        }
    }

    /// Sheet state at `address`, `None` when unmanaged.
    pub fn sheet(&self, address: &str) -> Result<Option<&SheetModel>, StateError> {
        match self.get(address) {
            None => Ok(None),
            Some(ResourceState::Sheet(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(address, "sheet", other)),
        }
    }

    pub fn require_range(&self, address: &str) -> Result<&RangeModel, StateError> {
        self.range(address)?
            .ok_or_else(|| StateError::NotManaged(address.to_string()))
    }

    pub fn require_sheet(&self, address: &str) -> Result<&SheetModel, StateError> {
        self.sheet(address)?
            .ok_or_else(|| StateError::NotManaged(address.to_string()))
    }

    /// Record a newly created or imported resource.
    pub fn insert(&mut self, address: &str, resource: ResourceState) -> Result<(), StateError> {
        if self.is_managed(address) {
            return Err(StateError::AlreadyManaged(address.to_string()));
        }
        self.put(address, resource);
        Ok(())
    }

    /// Overwrite the state of a managed resource.
    pub fn replace(&mut self, address: &str, resource: ResourceState) -> Result<(), StateError> {
        if !self.is_managed(address) {
            return Err(StateError::NotManaged(address.to_string()));
        }
        self.put(address, resource);
        Ok(())
    }

    /// Forget a managed resource.
    pub fn remove(&mut self, address: &str) -> Result<ResourceState, StateError> {
        let entry = self
            .resources
            .remove(address)
            .ok_or_else(|| StateError::NotManaged(address.to_string()))?;
        self.dirty = true;
        Ok(entry.resource)
    }

    fn put(&mut self, address: &str, resource: ResourceState) {
        self.resources.insert(
            address.to_string(),
            StateEntry {
                resource,
                updated_at: Utc::now(),
            },
        );
        self.dirty = true;
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, e: std::io::Error) -> StateError {
    StateError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn wrong_type(address: &str, expected: &'static str, found: &ResourceState) -> StateError {
    StateError::WrongType {
        address: address.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsheets_grid::Grid;
    use tempfile::TempDir;

    fn range() -> ResourceState {
        ResourceState::Range(RangeModel::new("s", "A1:B2", Grid::from(vec![vec!["a", "b"]])))
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = TempDir::new().unwrap();
        let state = StateFile::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(state.version, STATE_VERSION);
        assert!(state.resources.is_empty());
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("gsheets.state.json");

        let mut state = StateFile::default();
        state.insert("main", range()).unwrap();
        assert!(state.is_dirty());
        state.save(&path).unwrap();
        assert!(!state.is_dirty());
        assert!(!dir.path().join("nested").join("gsheets.state.json.tmp").exists());

        let loaded = StateFile::load(&path).unwrap();
        assert_eq!(loaded.serial, 1);
        assert_eq!(loaded.get("main"), Some(&range()));
    }

    #[test]
    fn test_lifecycle_guards() {
        let mut state = StateFile::default();
        assert!(matches!(
            state.replace("main", range()),
            Err(StateError::NotManaged(_))
        ));
        assert!(matches!(state.remove("main"), Err(StateError::NotManaged(_))));

        state.insert("main", range()).unwrap();
        assert!(matches!(
            state.insert("main", range()),
            Err(StateError::AlreadyManaged(_))
        ));
        state.replace("main", range()).unwrap();
        assert_eq!(state.remove("main").unwrap(), range());
        assert!(!state.is_managed("main"));
    }

    #[test]
    fn test_wrong_type() {
        let mut state = StateFile::default();
        state.insert("main", range()).unwrap();
        let err = state.require_sheet("main").unwrap_err();
        assert_eq!(err.to_string(), "resource 'main' is a range, not a sheet");
        assert!(state.require_range("main").is_ok());
        assert!(matches!(
            state.require_range("other"),
            Err(StateError::NotManaged(_))
        ));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"version": 99, "resources": {}}"#).unwrap();
        assert!(matches!(
            StateFile::load(&path),
            Err(StateError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(StateFile::load(&path), Err(StateError::Parse { .. })));
    }

    #[test]
    fn test_entry_is_tagged_by_type() {
        let mut state = StateFile::default();
        state
            .insert("tab", ResourceState::Sheet(SheetModel::new("s", "Budget")))
            .unwrap();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["resources"]["tab"]["resource"]["type"], "sheet");
        assert_eq!(json["resources"]["tab"]["resource"]["title"], "Budget");
    }
}
