use super::{Affected, CmdMessage, CmdResult};
use crate::error::{Result, ShowcaseError};
use crate::forms::{FormErrors, TagForm};
use crate::model::{Project, Tag};
use crate::store::RecordStore;
use serde::Serialize;

/// A tag and the number of projects using it.
#[derive(Debug, Clone, Serialize)]
pub struct TagUsage {
    pub tag: Tag,
    pub projects: usize,
}

pub fn list<S: RecordStore>(store: &S) -> Result<Vec<TagUsage>> {
    let projects = store.find_all::<Project>()?;
    Ok(store
        .find_all::<Tag>()?
        .into_iter()
        .map(|tag| {
            let count = projects.iter().filter(|p| p.tags.contains(&tag.id)).count();
            TagUsage {
                tag,
                projects: count,
            }
        })
        .collect())
}

/// Finds a tag by name, ignoring case.
pub fn find_by_name<S: RecordStore>(store: &S, name: &str) -> Result<Option<Tag>> {
    let needle = name.trim().to_lowercase();
    store.find_one::<Tag, _>(|t| t.name.to_lowercase() == needle)
}

pub fn create<S: RecordStore>(store: &mut S, form: TagForm) -> Result<CmdResult> {
    form.validate()?;
    let name = form.name.trim();
    if find_by_name(store, name)?.is_some() {
        return Err(ShowcaseError::Duplicate(format!("tag '{}'", name)));
    }

    let tag = Tag::new(name);
    store.save(&tag)?;
    Ok(CmdResult::default()
        .with_affected(Affected::of(&tag, &tag.name))
        .with_message(CmdMessage::success(format!("Created tag {}", tag.name))))
}

/// Deletes a tag and removes it from every project that carries it.
pub fn delete<S: RecordStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let tag = find_by_name(store, name)?.ok_or_else(|| ShowcaseError::not_found("tag", name))?;

    let mut result = CmdResult::default();
    for mut project in store.filter::<Project, _>(|p| p.tags.contains(&tag.id))? {
        project.tags.retain(|id| *id != tag.id);
        store.save(&project)?;
        result.add_affected(Affected::of(&project, &project.title));
    }
    store.delete::<Tag>(&tag.id)?;
    result.add_message(CmdMessage::success(format!("Deleted tag {}", tag.name)));
    Ok(result)
}

/// Resolves tag names to ids, reporting every unknown name under `tags`.
pub(crate) fn resolve_names<S: RecordStore>(store: &S, names: &[String]) -> Result<Vec<uuid::Uuid>> {
    let tags = store.find_all::<Tag>()?;
    let mut ids = Vec::new();
    let mut errors = FormErrors::new();

    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let needle = name.to_lowercase();
        match tags.iter().find(|t| t.name.to_lowercase() == needle) {
            Some(tag) if !ids.contains(&tag.id) => ids.push(tag.id),
            Some(_) => {}
            None => errors.add(
                "tags",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    name
                ),
            ),
        }
    }

    errors.into_result()?;
    Ok(ids)
}
