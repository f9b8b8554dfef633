use super::{check_unique, next_version, RecordStore};
use crate::error::{Result, ShowcaseError};
use crate::model::{sort_records, Record};
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use uuid::Uuid;

/// File-backed record storage.
///
/// ```text
/// <root>/
/// ├── projects.json        # {"<uuid>": {...}, ...}
/// ├── .projects.lock       # advisory lock held during writes
/// ├── reviews.json
/// └── ...
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// Exclusive lock on one collection, released on drop.
struct CollectionLock {
    file: File,
}

impl Drop for CollectionLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path<R: Record>(&self) -> PathBuf {
        self.root.join(format!("{}.json", R::COLLECTION))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ShowcaseError::Io)?;
        }
        Ok(())
    }

    fn lock<R: Record>(&self) -> Result<CollectionLock> {
        self.ensure_dir()?;
        let path = self.root.join(format!(".{}.lock", R::COLLECTION));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(ShowcaseError::Io)?;
        file.lock_exclusive().map_err(ShowcaseError::Io)?;
        Ok(CollectionLock { file })
    }

    fn load<R: Record>(&self) -> Result<BTreeMap<Uuid, R>> {
        let path = self.collection_path::<R>();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(ShowcaseError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let records = serde_json::from_str(&content).map_err(ShowcaseError::Serialization)?;
        Ok(records)
    }

    fn write<R: Record>(&self, records: &BTreeMap<Uuid, R>) -> Result<()> {
        let path = self.collection_path::<R>();
        let content = serde_json::to_string_pretty(records).map_err(ShowcaseError::Serialization)?;

        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", R::COLLECTION, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(ShowcaseError::Io)?;
        fs::rename(&tmp, &path).map_err(ShowcaseError::Io)?;
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn find_all<R: Record>(&self) -> Result<Vec<R>> {
        let mut records: Vec<R> = self.load::<R>()?.into_values().collect();
        sort_records(&mut records);
        debug!(collection = R::COLLECTION, count = records.len(), "loaded records");
        Ok(records)
    }

    fn find_by_id<R: Record>(&self, id: &Uuid) -> Result<R> {
        self.load::<R>()?
            .remove(id)
            .ok_or_else(|| ShowcaseError::not_found(R::KIND, id))
    }

    #[instrument(skip_all, fields(collection = R::COLLECTION, id = %record.id()))]
    fn save<R: Record>(&mut self, record: &R) -> Result<()> {
        let _lock = self.lock::<R>()?;

        let mut records = self.load::<R>()?;
        let stored = records.get(&record.id()).map(Record::version);
        let version = next_version(stored, record)?;
        check_unique(records.values(), record)?;

        let mut record = record.clone();
        record.set_version(version);
        records.insert(record.id(), record);
        self.write(&records)?;

        debug!(version, "saved record");
        Ok(())
    }

    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    fn delete<R: Record>(&mut self, id: &Uuid) -> Result<()> {
        let _lock = self.lock::<R>()?;

        let mut records = self.load::<R>()?;
        if records.remove(id).is_none() {
            return Err(ShowcaseError::not_found(R::KIND, id));
        }
        self.write(&records)?;
        debug!("deleted record");
        Ok(())
    }
}
