use super::{check_unique, next_version, RecordStore};
use crate::error::{Result, ShowcaseError};
use crate::model::{sort_records, Record};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Records are kept as JSON values per collection so one store can hold every
/// record type, exactly like the file store does on disk.
#[derive(Default)]
pub struct InMemoryStore {
    collections: HashMap<&'static str, HashMap<Uuid, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection<R: Record>(&self) -> Option<&HashMap<Uuid, Value>> {
        self.collections.get(R::COLLECTION)
    }
}

impl RecordStore for InMemoryStore {
    fn find_all<R: Record>(&self) -> Result<Vec<R>> {
        let mut records = match self.collection::<R>() {
            Some(values) => values
                .values()
                .map(|v| serde_json::from_value(v.clone()).map_err(ShowcaseError::Serialization))
                .collect::<Result<Vec<R>>>()?,
            None => Vec::new(),
        };
        sort_records(&mut records);
        Ok(records)
    }

    fn find_by_id<R: Record>(&self, id: &Uuid) -> Result<R> {
        let value = self
            .collection::<R>()
            .and_then(|values| values.get(id))
            .ok_or_else(|| ShowcaseError::not_found(R::KIND, id))?;
        Ok(serde_json::from_value(value.clone())?)
    }

    fn save<R: Record>(&mut self, record: &R) -> Result<()> {
        let stored = match self.collection::<R>().and_then(|values| values.get(&record.id())) {
            Some(value) => Some(serde_json::from_value::<R>(value.clone())?.version()),
            None => None,
        };
        let version = next_version(stored, record)?;
        check_unique(&self.find_all::<R>()?, record)?;

        let mut record = record.clone();
        record.set_version(version);
        let value = serde_json::to_value(&record)?;
        self.collections
            .entry(R::COLLECTION)
            .or_default()
            .insert(record.id(), value);
        debug!(collection = R::COLLECTION, id = %record.id(), version, "saved record");
        Ok(())
    }

    fn delete<R: Record>(&mut self, id: &Uuid) -> Result<()> {
        let removed = self
            .collections
            .get_mut(R::COLLECTION)
            .and_then(|values| values.remove(id));
        if removed.is_none() {
            return Err(ShowcaseError::not_found(R::KIND, id));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Profile, Project, Review, Tag, VoteTally, VoteValue};

    /// Builder for a pre-populated [`InMemoryStore`].
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` untagged projects titled "Project 01", "Project 02", ...
        pub fn with_projects(mut self, count: usize) -> Self {
            for i in 0..count {
                let project = Project::new(format!("Project {:02}", i + 1));
                self.store.save(&project).unwrap();
            }
            self
        }

        pub fn with_project(mut self, title: &str, tags: &[&str]) -> Self {
            let mut project = Project::new(title);
            for name in tags {
                project.tags.push(self.tag_id(name));
            }
            self.store.save(&project).unwrap();
            self
        }

        pub fn with_tag(mut self, name: &str) -> Self {
            self.tag_id(name);
            self
        }

        pub fn with_profile(mut self, name: &str) -> Self {
            let profile = Profile::new(name, name.to_lowercase().replace(' ', "-"));
            self.store.save(&profile).unwrap();
            self
        }

        /// Adds a project owned by nobody with the given votes already tallied.
        pub fn with_voted_project(mut self, title: &str, up: u32, down: u32) -> Self {
            let mut project = Project::new(title);
            for value in std::iter::repeat(VoteValue::Up)
                .take(up as usize)
                .chain(std::iter::repeat(VoteValue::Down).take(down as usize))
            {
                let voter = Profile::new("Voter", format!("voter-{}", Uuid::new_v4()));
                self.store.save(&voter).unwrap();
                self.store
                    .save(&Review::new(voter.id, project.id, value))
                    .unwrap();
            }
            project.apply_tally(VoteTally { up, down });
            self.store.save(&project).unwrap();
            self
        }

        pub fn project(&self, title: &str) -> Project {
            self.store
                .find_one::<Project, _>(|p| p.title == title)
                .unwrap()
                .unwrap_or_else(|| panic!("no project titled {}", title))
        }

        pub fn profile(&self, name: &str) -> Profile {
            self.store
                .find_one::<Profile, _>(|p| p.name == name)
                .unwrap()
                .unwrap_or_else(|| panic!("no profile named {}", name))
        }

        fn tag_id(&mut self, name: &str) -> Uuid {
            if let Some(tag) = self.store.find_one::<Tag, _>(|t| t.name == name).unwrap() {
                return tag.id;
            }
            let tag = Tag::new(name);
            self.store.save(&tag).unwrap();
            tag.id
        }
    }

    /// A store whose next `conflicts` project saves lose a race.
    pub struct RacingStore {
        pub inner: InMemoryStore,
        pub conflicts: usize,
    }

    impl RacingStore {
        pub fn new(inner: InMemoryStore, conflicts: usize) -> Self {
            Self { inner, conflicts }
        }
    }

    impl RecordStore for RacingStore {
        fn find_all<R: Record>(&self) -> Result<Vec<R>> {
            self.inner.find_all()
        }

        fn find_by_id<R: Record>(&self, id: &Uuid) -> Result<R> {
            self.inner.find_by_id(id)
        }

        fn save<R: Record>(&mut self, record: &R) -> Result<()> {
            if R::KIND == Project::KIND && self.conflicts > 0 {
                self.conflicts -= 1;
                // Someone else saved the same version first
                let current: R = self.inner.find_by_id(&record.id())?;
                self.inner.save(&current)?;
            }
            self.inner.save(record)
        }

        fn delete<R: Record>(&mut self, id: &Uuid) -> Result<()> {
            self.inner.delete::<R>(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::model::{Project, Tag};

    #[test]
    fn find_by_id_missing_is_not_found() {
        let store = InMemoryStore::new();
        let id = Uuid::new_v4();
        match store.find_by_id::<Project>(&id) {
            Err(ShowcaseError::NotFound { kind, id: missing }) => {
                assert_eq!(kind, "project");
                assert_eq!(missing, id.to_string());
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            store.delete::<Tag>(&Uuid::new_v4()),
            Err(ShowcaseError::NotFound { .. })
        ));
    }

    #[test]
    fn save_bumps_version_and_rejects_stale_copies() {
        let mut store = InMemoryStore::new();
        let project = Project::new("Versioned");
        store.save(&project).unwrap();

        let mut first = store.find_by_id::<Project>(&project.id).unwrap();
        let mut second = first.clone();
        assert_eq!(first.version, 1);

        first.title = "First writer".into();
        store.save(&first).unwrap();

        second.title = "Second writer".into();
        assert!(store.save(&second).unwrap_err().is_version_conflict());

        let stored = store.find_by_id::<Project>(&project.id).unwrap();
        assert_eq!(stored.title, "First writer");
        assert_eq!(stored.version, 2);
    }

    #[test]
    fn collections_are_isolated_by_type() {
        let fixture = StoreFixture::new().with_projects(2).with_tag("rust");
        assert_eq!(fixture.store.find_all::<Project>().unwrap().len(), 2);
        assert_eq!(fixture.store.find_all::<Tag>().unwrap().len(), 1);
    }

    #[test]
    fn find_all_uses_default_ordering() {
        let fixture = StoreFixture::new()
            .with_voted_project("Low", 1, 3)
            .with_voted_project("High", 3, 1)
            .with_project("Unvoted", &[]);
        let titles: Vec<_> = fixture
            .store
            .find_all::<Project>()
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["High", "Low", "Unvoted"]);
    }

    #[test]
    fn filter_preserves_order() {
        let fixture = StoreFixture::new().with_projects(5);
        let odd: Vec<Project> = fixture
            .store
            .filter(|p: &Project| p.title.ends_with('1') || p.title.ends_with('3'))
            .unwrap();
        let titles: Vec<_> = odd.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Project 01", "Project 03"]);
    }
}
