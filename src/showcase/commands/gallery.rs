use super::helpers::{assign_slug, find_by_slug};
use super::{Affected, CmdMessage, CmdResult};
use crate::error::{Result, ShowcaseError};
use crate::forms::{clean_optional, CategoryForm, GalleryImageForm};
use crate::model::{GalleryCategory, GalleryImage};
use crate::search::{normalize_query, Searchable};
use crate::store::RecordStore;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

const NAME_MAX: usize = 100;

impl Searchable for GalleryImage {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryEntry {
    pub image: GalleryImage,
    pub title: String,
    pub category: Option<String>,
}

/// Filters for [`list`]. All unset means every image.
#[derive(Debug, Clone, Default)]
pub struct GalleryFilter {
    pub category: Option<String>,
    pub featured_only: bool,
    pub query: Option<String>,
}

/// Images newest first.
pub fn list<S: RecordStore>(store: &S, filter: &GalleryFilter) -> Result<Vec<GalleryEntry>> {
    let only = match filter.category.as_deref() {
        Some(slug) => Some(find_by_slug::<GalleryCategory, S>(store, slug)?.id),
        None => None,
    };
    let needle = normalize_query(filter.query.as_deref());
    let names: HashMap<Uuid, String> = store
        .find_all::<GalleryCategory>()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    Ok(store
        .filter::<GalleryImage, _>(|img| {
            (!filter.featured_only || img.is_featured)
                && only.map_or(true, |id| img.category == Some(id))
                && needle.as_deref().map_or(true, |n| img.matches(n))
        })?
        .into_iter()
        .map(|image| GalleryEntry {
            title: image.display_title(),
            category: image.category.and_then(|id| names.get(&id).cloned()),
            image,
        })
        .collect())
}

pub fn list_categories<S: RecordStore>(store: &S) -> Result<Vec<GalleryCategory>> {
    store.filter::<GalleryCategory, _>(|c| c.is_active)
}

pub fn create_category<S: RecordStore>(store: &mut S, form: CategoryForm) -> Result<CmdResult> {
    form.validate(NAME_MAX, NAME_MAX)?;
    let name = form.name.trim();
    if store
        .find_one::<GalleryCategory, _>(|c| c.name == name)?
        .is_some()
    {
        return Err(ShowcaseError::Duplicate(format!(
            "gallery category '{}'",
            name
        )));
    }

    let mut category = GalleryCategory::new(name, "");
    category.slug = assign_slug::<GalleryCategory, S>(
        store,
        clean_optional(form.slug).as_deref(),
        &category.name,
        NAME_MAX,
        category.id,
    )?;
    category.order = form.order;
    category.is_active = form.is_active;
    store.save(&category)?;

    Ok(CmdResult::default()
        .with_affected(Affected::of(&category, &category.slug))
        .with_message(CmdMessage::success(format!(
            "Created gallery category {}",
            category.name
        ))))
}

pub fn add_image<S: RecordStore>(store: &mut S, form: GalleryImageForm) -> Result<CmdResult> {
    form.validate()?;
    let category = match clean_optional(form.category) {
        Some(slug) => Some(find_by_slug::<GalleryCategory, S>(store, &slug)?),
        None => None,
    };

    let mut image = GalleryImage::new(form.image.trim());
    image.category = category.as_ref().map(|c| c.id);
    image.title = form.title.trim().to_string();
    image.description = form.description;
    image.is_featured = form.is_featured;
    store.save(&image)?;

    Ok(CmdResult::default()
        .with_affected(Affected::of(&image, image.display_title()))
        .with_message(CmdMessage::success(format!(
            "Added {}",
            image.display_title()
        ))))
}

/// Deletes a gallery category. Its images stay, uncategorized.
pub fn delete_category<S: RecordStore>(store: &mut S, slug: &str) -> Result<CmdResult> {
    let category = find_by_slug::<GalleryCategory, S>(store, slug)?;
    let mut result = CmdResult::default().with_affected(Affected::of(&category, &category.slug));

    for mut image in store.filter::<GalleryImage, _>(|img| img.category == Some(category.id))? {
        image.category = None;
        store.save(&image)?;
        result.add_affected(Affected::of(&image, image.display_title()));
    }
    store.delete::<GalleryCategory>(&category.id)?;

    result.add_message(CmdMessage::success(format!(
        "Deleted gallery category {}",
        category.name
    )));
    Ok(result)
}
