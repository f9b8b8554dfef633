//! Restaurant site records: menu, gallery and static pages.

use super::{impl_record, short_id, Slugged};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub name: String,
    pub slug: String,
    pub order: u32,
    pub is_active: bool,
}

impl MenuCategory {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            name: name.into(),
            slug: slug.into(),
            order: 0,
            is_active: true,
        }
    }
}

impl_record!(MenuCategory, "menu category", "menu_categories", |a, b| a
    .order
    .cmp(&b.order)
    .then_with(|| a.name.cmp(&b.name)), unique |c| vec![
        format!("name '{}'", c.name),
        format!("slug '{}'", c.slug),
    ]);

impl Slugged for MenuCategory {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// A dish or drink. Deleted together with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub category: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Price in cents.
    pub price: u64,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl MenuItem {
    pub fn new(category: Uuid, name: impl Into<String>, slug: impl Into<String>, price: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            category,
            name: name.into(),
            slug: slug.into(),
            description: String::new(),
            price,
            image: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn display_name(&self, category: &MenuCategory) -> String {
        format!("{} ({})", self.name, category.name)
    }
}

// Stores order items by name alone; grouping by category order happens
// when the menu is assembled.
impl_record!(MenuItem, "menu item", "menu_items", |a, b| a
    .name
    .cmp(&b.name), unique |i| vec![format!("slug '{}'", i.slug)]);

impl Slugged for MenuItem {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Formats a price in cents as `12.50`.
pub fn format_price(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryCategory {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub name: String,
    pub slug: String,
    pub order: u32,
    pub is_active: bool,
}

impl GalleryCategory {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            name: name.into(),
            slug: slug.into(),
            order: 0,
            is_active: true,
        }
    }
}

impl_record!(GalleryCategory, "gallery category", "gallery_categories", |a, b| a
    .order
    .cmp(&b.order)
    .then_with(|| a.name.cmp(&b.name)), unique |c| vec![
        format!("name '{}'", c.name),
        format!("slug '{}'", c.slug),
    ]);

impl Slugged for GalleryCategory {
    fn slug(&self) -> &str {
        &self.slug
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub category: Option<Uuid>,
    pub title: String,
    pub image: String,
    pub description: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl GalleryImage {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            category: None,
            title: String::new(),
            image: image.into(),
            description: String::new(),
            is_featured: false,
            created_at: Utc::now(),
        }
    }

    pub fn display_title(&self) -> String {
        if self.title.trim().is_empty() {
            format!("Photo #{}", short_id(&self.id))
        } else {
            self.title.clone()
        }
    }
}

impl_record!(GalleryImage, "gallery image", "gallery_images", |a, b| b
    .created_at
    .cmp(&a.created_at));

/// Static page content keyed by `page_name` ("about", "contacts").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePage {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub page_name: String,
    pub title: String,
    pub about: String,
}

impl SitePage {
    pub fn new(page_name: impl Into<String>, title: impl Into<String>, about: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            page_name: page_name.into(),
            title: title.into(),
            about: about.into(),
        }
    }
}

impl_record!(SitePage, "page", "pages", |a, b| a
    .page_name
    .cmp(&b.page_name));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(0), "0.00");
        assert_eq!(format_price(1250), "12.50");
        assert_eq!(format_price(7), "0.07");
    }

    #[test]
    fn untitled_images_fall_back_to_short_id() {
        let mut image = GalleryImage::new("gallery/2024/05/a.jpg");
        assert!(image.display_title().starts_with("Photo #"));
        assert_eq!(image.display_title().len(), "Photo #".len() + 8);

        image.title = "Terrace".into();
        assert_eq!(image.display_title(), "Terrace");
    }

    #[test]
    fn menu_item_display_includes_category() {
        let category = MenuCategory::new("Breakfast", "breakfast");
        let item = MenuItem::new(category.id, "Pancakes", "pancakes", 650);
        assert_eq!(item.display_name(&category), "Pancakes (Breakfast)");
    }
}
