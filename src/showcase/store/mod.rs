//! # Storage Layer
//!
//! The [`RecordStore`] trait is the only way the rest of the crate touches
//! persisted data. Commands are generic over it, so every listing, search and
//! vote can be exercised against [`memory::InMemoryStore`] without a disk.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON document per collection (`projects.json`,
//!   `reviews.json`, ...) under a data directory. Writes are atomic (temp file
//!   and rename) and serialized across processes by a per-collection lock file.
//! - [`memory::InMemoryStore`]: no persistence, for tests and embedding.
//!
//! ## Ordering
//!
//! `find_all` and `filter` return records in the record type's default
//! ordering ([`Record::default_order`]); callers never sort again.
//!
//! ## Optimistic versioning
//!
//! Every record carries the version of the stored copy it was read from.
//! `save` only succeeds when that version still matches what is stored, and
//! bumps it. A writer that lost a race gets [`ShowcaseError::VersionConflict`]
//! and must re-read before trying again:
//!
//! ```text
//! A: read project (v3)          B: read project (v3)
//! A: save (v3 == v3) -> v4
//!                               B: save (v3 != v4) -> VersionConflict
//!                               B: re-read (v4), recompute, save -> v5
//! ```
//!
//! New records are saved with version 0 and must not already exist.
//!
//! ## Uniqueness
//!
//! Usernames, slugs and one review per profile and project are declared by
//! [`Record::unique_keys`]. `save` rejects a record sharing a key with another
//! stored record with [`ShowcaseError::Duplicate`], inside the same write that
//! checks the version, so two writers cannot both pass.

use crate::error::{Result, ShowcaseError};
use crate::model::Record;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for record storage.
pub trait RecordStore {
    /// All records of a type, in default order.
    fn find_all<R: Record>(&self) -> Result<Vec<R>>;

    /// A record by id, or [`ShowcaseError::NotFound`].
    fn find_by_id<R: Record>(&self, id: &Uuid) -> Result<R>;

    /// Insert or update a record, checking its version.
    fn save<R: Record>(&mut self, record: &R) -> Result<()>;

    /// Delete a record permanently.
    fn delete<R: Record>(&mut self, id: &Uuid) -> Result<()>;

    /// Records matching a predicate, in default order.
    fn filter<R, P>(&self, predicate: P) -> Result<Vec<R>>
    where
        R: Record,
        P: Fn(&R) -> bool,
    {
        Ok(self
            .find_all::<R>()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }

    /// First record matching a predicate, in default order.
    fn find_one<R, P>(&self, predicate: P) -> Result<Option<R>>
    where
        R: Record,
        P: Fn(&R) -> bool,
    {
        Ok(self.find_all::<R>()?.into_iter().find(|record| predicate(record)))
    }
}

/// Checks `record` against the currently stored version and returns the version to store.
pub(crate) fn next_version<R: Record>(stored: Option<u64>, record: &R) -> Result<u64> {
    match stored {
        None if record.version() == 0 => Ok(1),
        None => Err(ShowcaseError::not_found(R::KIND, record.id())),
        Some(found) if found == record.version() => Ok(found + 1),
        Some(found) => Err(ShowcaseError::VersionConflict {
            kind: R::KIND,
            id: record.id(),
            expected: record.version(),
            found,
        }),
    }
}

/// Fails when another record in `stored` already holds one of `record`'s unique keys.
pub(crate) fn check_unique<'a, R, I>(stored: I, record: &R) -> Result<()>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let keys = record.unique_keys();
    if keys.is_empty() {
        return Ok(());
    }
    for other in stored {
        if other.id() == record.id() {
            continue;
        }
        if let Some(key) = other.unique_keys().into_iter().find(|k| keys.contains(k)) {
            return Err(ShowcaseError::Duplicate(format!("{} with {}", R::KIND, key)));
        }
    }
    Ok(())
}
