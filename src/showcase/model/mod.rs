//! # Records
//!
//! Every persisted entity implements [`Record`]: a UUID identity, an optimistic
//! concurrency `version`, and a default ordering that stores apply to every
//! `find_all`/`filter` result.
//!
//! Relations are held as ids (`owner: Option<Uuid>`, `tags: Vec<Uuid>`) and are
//! resolved by the command layer, which also enforces the delete rules
//! (cascade, set-null, protect) described on each record.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Ordering;
use uuid::Uuid;

pub mod blog;
pub mod devsearch;
pub mod food;

pub use blog::{Category, Post};
pub use devsearch::{Profile, Project, Review, Tag, VoteTally, VoteValue};
pub use food::{GalleryCategory, GalleryImage, MenuCategory, MenuItem, SitePage};

pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Human readable name used in messages and errors ("project").
    const KIND: &'static str;
    /// Storage collection name ("projects").
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;

    /// Version of the stored copy this value was read from; 0 for unsaved records.
    fn version(&self) -> u64;

    fn set_version(&mut self, version: u64);

    fn default_order(a: &Self, b: &Self) -> Ordering;

    /// Values no two records of the collection may share ("slug 'news'").
    /// Stores check them under the same write that checks the version.
    fn unique_keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Records addressable by a unique slug.
pub trait Slugged {
    fn slug(&self) -> &str;
}

/// Sorts records in place by their default ordering.
pub fn sort_records<R: Record>(records: &mut [R]) {
    records.sort_by(R::default_order);
}

macro_rules! impl_record {
    ($ty:ty, $kind:literal, $collection:literal, |$a:ident, $b:ident| $order:expr
        $(, unique |$r:ident| $keys:expr)?) => {
        impl $crate::model::Record for $ty {
            const KIND: &'static str = $kind;
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> uuid::Uuid {
                self.id
            }

            fn version(&self) -> u64 {
                self.version
            }

            fn set_version(&mut self, version: u64) {
                self.version = version;
            }

            fn default_order($a: &Self, $b: &Self) -> std::cmp::Ordering {
                $order
            }

            $(
                fn unique_keys(&self) -> Vec<String> {
                    let $r = self;
                    $keys
                }
            )?
        }
    };
}

pub(crate) use impl_record;

/// First eight hex digits of an id, as shown to users.
pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}
