//! docseq-storage-json
//!
//! File-backed [`DocumentStore`] keeping every document, issued high-water
//! mark and counter in one JSON snapshot.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use docseq_core::{DocumentSet, DocumentStore, StoreError};
use docseq_domain::{Document, SequenceScope};
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_STORE_FILE: &str = "documents.json";
const TMP_SUFFIX: &str = "tmp";

/// JSON snapshot store.
///
/// Each operation loads the snapshot, applies the change and replaces the
/// file through a temporary sibling and a rename, all under one in-process
/// mutex. Separate processes sharing the file are not coordinated.
#[derive(Debug)]
pub struct JsonDocumentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonDocumentStore {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            save_document_set(&DocumentSet::default(), &path)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Opens `documents.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Result<Self, StoreError> {
        Self::open(dir.join(DEFAULT_STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock
            .lock()
            .map_err(|_| StoreError::Unavailable("json store lock poisoned".into()))
    }

    fn read<T>(&self, query: impl FnOnce(&DocumentSet) -> T) -> Result<T, StoreError> {
        let _guard = self.guard()?;
        let set = load_document_set(&self.path)?;
        Ok(query(&set))
    }

    /// Nothing is written when `change` fails.
    fn write<T>(
        &self,
        change: impl FnOnce(&mut DocumentSet) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.guard()?;
        let mut set = load_document_set(&self.path)?;
        let output = change(&mut set)?;
        save_document_set(&set, &self.path)?;
        Ok(output)
    }
}

impl DocumentStore for JsonDocumentStore {
    fn highest_sequence(&self, scope: &SequenceScope) -> Result<u32, StoreError> {
        self.read(|set| set.highest_sequence(scope))
    }

    fn number_taken(
        &self,
        scope: &SequenceScope,
        formatted: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        self.read(|set| set.number_taken(scope, formatted, exclude))
    }

    fn insert(&self, document: &Document) -> Result<(), StoreError> {
        self.write(|set| set.insert(document.clone()))?;
        debug!(path = %self.path.display(), number = %document.document_number, "document inserted");
        Ok(())
    }

    fn update(&self, document: &Document) -> Result<(), StoreError> {
        self.write(|set| set.update(document.clone()))?;
        debug!(path = %self.path.display(), number = %document.document_number, "document updated");
        Ok(())
    }

    fn next_counter(&self, scope: &SequenceScope) -> Result<u32, StoreError> {
        self.write(|set| set.next_counter(scope))
    }

    fn get(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        self.read(|set| set.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Document>, StoreError> {
        self.read(|set| set.documents.clone())
    }
}

/// Loads a snapshot, treating a missing file as an empty store.
pub fn load_document_set(path: &Path) -> Result<DocumentSet, StoreError> {
    if !path.exists() {
        return Ok(DocumentSet::default());
    }
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| StoreError::Serde(err.to_string()))
}

pub fn save_document_set(set: &DocumentSet, path: &Path) -> Result<(), StoreError> {
    let json =
        serde_json::to_string_pretty(set).map_err(|err| StoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
