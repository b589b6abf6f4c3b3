use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::chore::ChoreCollection;
use crate::error::ChoreError;

/// Durable home of the chore document.
///
/// `load` never fails: a missing or unreadable document is an empty
/// collection. `save` overwrites the whole document.
pub trait ChoreStore {
    fn load(&self) -> ChoreCollection;
    fn save(&self, collection: &ChoreCollection) -> Result<(), ChoreError>;
}

pub fn decode_document(raw: &str) -> Result<ChoreCollection, ChoreError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn encode_document(collection: &ChoreCollection) -> Result<String, ChoreError> {
    let mut encoded = serde_json::to_string_pretty(collection)?;
    encoded.push('\n');
    Ok(encoded)
}

fn decode_or_empty(raw: &str, source: &str) -> ChoreCollection {
    match decode_document(raw) {
        Ok(collection) => {
            debug!(source, item_count = collection.len(), "chore document loaded");
            collection
        }
        Err(err) => {
            warn!(source, %err, "chore document unreadable, starting empty");
            ChoreCollection::default()
        }
    }
}

/// Chore document kept as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("chores.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ChoreStore for JsonFileStore {
    fn load(&self) -> ChoreCollection {
        let source = self.path.display().to_string();
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode_or_empty(&raw, &source),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %source, "no chore document yet");
                ChoreCollection::default()
            }
            Err(err) => {
                warn!(path = %source, %err, "failed to read chore document, starting empty");
                ChoreCollection::default()
            }
        }
    }

    fn save(&self, collection: &ChoreCollection) -> Result<(), ChoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let staging = self.staging_path();
        fs::write(&staging, encode_document(collection)?)?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                warn!(path = %staging.display(), %cleanup, "failed to remove staging file");
            }
            return Err(err.into());
        }
        debug!(
            path = %self.path.display(),
            item_count = collection.len(),
            "chore document saved"
        );
        Ok(())
    }
}

/// Chore document held in memory, for host simulation and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    /// The document as last written, if any.
    pub fn contents(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl ChoreStore for MemoryStore {
    fn load(&self) -> ChoreCollection {
        match self.raw.borrow().as_deref() {
            Some(raw) => decode_or_empty(raw, "memory"),
            None => ChoreCollection::default(),
        }
    }

    fn save(&self, collection: &ChoreCollection) -> Result<(), ChoreError> {
        let encoded = encode_document(collection)?;
        self.raw.replace(Some(encoded));
        Ok(())
    }
}
