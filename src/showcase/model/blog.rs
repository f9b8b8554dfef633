//! Blog records.

use super::{impl_record, Slugged};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post category. Cannot be deleted while posts reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            name: name.into(),
            slug: slug.into(),
        }
    }
}

impl_record!(Category, "category", "blog_categories", |a, b| a
    .name
    .cmp(&b.name), unique |c| vec![format!("slug '{}'", c.slug)]);

impl Slugged for Category {
    fn slug(&self) -> &str {
        &self.slug
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub photo: Option<String>,
    pub time_created: DateTime<Utc>,
    pub time_updated: DateTime<Utc>,
    pub is_published: bool,
    pub category: Uuid,
}

impl Post {
    pub fn new(title: impl Into<String>, slug: impl Into<String>, category: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            version: 0,
            title: title.into(),
            slug: slug.into(),
            content: String::new(),
            photo: None,
            time_created: now,
            time_updated: now,
            is_published: true,
            category,
        }
    }
}

// Newest first
impl_record!(Post, "post", "posts", |a, b| b
    .time_created
    .cmp(&a.time_created), unique |p| vec![format!("slug '{}'", p.slug)]);

impl Slugged for Post {
    fn slug(&self) -> &str {
        &self.slug
    }
}
