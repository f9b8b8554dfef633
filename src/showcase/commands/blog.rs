use super::helpers::{assign_slug, find_by_slug};
use super::listing::{self, Listing, ListingRequest};
use super::{Affected, CmdMessage, CmdResult};
use crate::error::{Result, ShowcaseError};
use crate::forms::{clean_optional, CategoryForm, PostForm};
use crate::model::{Category, Post, Record};
use crate::paginate::Paginator;
use crate::search::Searchable;
use crate::store::RecordStore;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

const TITLE_SLUG_MAX: usize = 255;
const CATEGORY_NAME_MAX: usize = 200;
const CATEGORY_SLUG_MAX: usize = 255;

/// A published post with its category name, as shown in listings.
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub post: Post,
    pub category: String,
}

impl Searchable for PostCard {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.post.title.as_str(), self.post.content.as_str()]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryUsage {
    pub category: Category,
    pub posts: usize,
}

/// Published posts, newest first, optionally restricted to one category.
pub fn list<S: RecordStore>(
    store: &S,
    category: Option<&str>,
    request: &ListingRequest,
    paginator: &Paginator,
) -> Result<Listing<PostCard>> {
    let only = match category {
        Some(slug) => Some(find_by_slug::<Category, S>(store, slug)?.id),
        None => None,
    };
    let names: HashMap<Uuid, String> = store
        .find_all::<Category>()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let cards = store
        .filter::<Post, _>(|p| p.is_published && only.map_or(true, |id| p.category == id))?
        .into_iter()
        .map(|post| PostCard {
            category: names.get(&post.category).cloned().unwrap_or_default(),
            post,
        })
        .collect();
    Ok(listing::build(cards, request, paginator))
}

/// A published post by slug. Drafts are not found.
pub fn view<S: RecordStore>(store: &S, slug: &str) -> Result<PostCard> {
    let post = find_by_slug::<Post, S>(store, slug)?;
    if !post.is_published {
        return Err(ShowcaseError::not_found(Post::KIND, slug));
    }
    let category = store.find_by_id::<Category>(&post.category)?;
    Ok(PostCard {
        post,
        category: category.name,
    })
}

pub fn create_post<S: RecordStore>(store: &mut S, form: PostForm) -> Result<CmdResult> {
    form.validate()?;
    let category = find_by_slug::<Category, S>(store, form.category.trim())?;

    let mut post = Post::new(form.title.trim(), "", category.id);
    post.slug = assign_slug::<Post, S>(
        store,
        clean_optional(form.slug).as_deref(),
        &post.title,
        TITLE_SLUG_MAX,
        post.id,
    )?;
    post.content = form.content;
    post.photo = clean_optional(form.photo);
    post.is_published = form.is_published;
    store.save(&post)?;
    info!(post = %post.id, slug = %post.slug, "created post");

    Ok(CmdResult::default()
        .with_affected(Affected::of(&post, &post.slug))
        .with_message(CmdMessage::success(format!("Created post {}", post.title))))
}

pub fn list_categories<S: RecordStore>(store: &S) -> Result<Vec<CategoryUsage>> {
    let posts = store.find_all::<Post>()?;
    Ok(store
        .find_all::<Category>()?
        .into_iter()
        .map(|category| CategoryUsage {
            posts: posts.iter().filter(|p| p.category == category.id).count(),
            category,
        })
        .collect())
}

pub fn create_category<S: RecordStore>(store: &mut S, form: CategoryForm) -> Result<CmdResult> {
    form.validate(CATEGORY_NAME_MAX, CATEGORY_SLUG_MAX)?;
    let mut category = Category::new(form.name.trim(), "");
    category.slug = assign_slug::<Category, S>(
        store,
        clean_optional(form.slug).as_deref(),
        &category.name,
        CATEGORY_SLUG_MAX,
        category.id,
    )?;
    store.save(&category)?;

    Ok(CmdResult::default()
        .with_affected(Affected::of(&category, &category.slug))
        .with_message(CmdMessage::success(format!(
            "Created category {}",
            category.name
        ))))
}

/// Deletes a category that no post references.
pub fn delete_category<S: RecordStore>(store: &mut S, slug: &str) -> Result<CmdResult> {
    let category = find_by_slug::<Category, S>(store, slug)?;
    let posts = store.filter::<Post, _>(|p| p.category == category.id)?;
    if !posts.is_empty() {
        return Err(ShowcaseError::Protected(format!(
            "category '{}' is used by {} post(s)",
            category.slug,
            posts.len()
        )));
    }
    store.delete::<Category>(&category.id)?;

    Ok(CmdResult::default()
        .with_affected(Affected::of(&category, &category.slug))
        .with_message(CmdMessage::success(format!(
            "Deleted category {}",
            category.name
        ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn category(store: &mut InMemoryStore, name: &str) {
        let form = CategoryForm {
            name: name.into(),
            ..Default::default()
        };
        create_category(store, form).unwrap();
    }

    fn post(store: &mut InMemoryStore, title: &str, category: &str, published: bool) -> String {
        let form = PostForm {
            title: title.into(),
            content: format!("All about {}", title.to_lowercase()),
            is_published: published,
            category: category.into(),
            ..Default::default()
        };
        let result = create_post(store, form).unwrap();
        result.affected[0].label.clone()
    }

    fn store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        category(&mut store, "Rust");
        category(&mut store, "Python Tips");
        store
    }

    #[test]
    fn category_slugs_are_generated() {
        let store = store();
        let slugs: Vec<_> = list_categories(&store)
            .unwrap()
            .into_iter()
            .map(|c| c.category.slug)
            .collect();
        assert_eq!(slugs, vec!["python-tips", "rust"]);
    }

    #[test]
    fn category_slugs_may_be_longer_than_names() {
        let mut store = InMemoryStore::new();
        let long = CategoryForm {
            name: "Long".into(),
            slug: Some("s".repeat(CATEGORY_SLUG_MAX)),
            ..Default::default()
        };
        create_category(&mut store, long).unwrap();

        let too_long = CategoryForm {
            name: "Longer".into(),
            slug: Some("s".repeat(CATEGORY_SLUG_MAX + 1)),
            ..Default::default()
        };
        match create_category(&mut store, too_long) {
            Err(ShowcaseError::Validation(errors)) => {
                assert!(errors.has("slug"));
                assert!(!errors.has("name"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let long_name = CategoryForm {
            name: "n".repeat(CATEGORY_NAME_MAX + 1),
            ..Default::default()
        };
        match create_category(&mut store, long_name) {
            Err(ShowcaseError::Validation(errors)) => assert!(errors.has("name")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn post_slugs_are_unique() {
        let mut store = store();
        assert_eq!(post(&mut store, "Hello World", "rust", true), "hello-world");
        assert_eq!(post(&mut store, "Hello world!", "rust", true), "hello-world-2");
        assert_eq!(post(&mut store, "Hello, World", "rust", true), "hello-world-3");
    }

    #[test]
    fn requested_post_slug_must_be_free() {
        let mut store = store();
        post(&mut store, "Hello", "rust", true);
        let form = PostForm {
            title: "Other".into(),
            slug: Some("hello".into()),
            category: "rust".into(),
            ..Default::default()
        };
        assert!(matches!(
            create_post(&mut store, form),
            Err(ShowcaseError::Duplicate(_))
        ));
    }

    #[test]
    fn list_hides_drafts_and_filters_by_category() {
        let mut store = store();
        post(&mut store, "Ownership", "rust", true);
        post(&mut store, "Lifetimes", "rust", false);
        post(&mut store, "Decorators", "python-tips", true);

        let paginator = Paginator::new(3);
        let all = list(&store, None, &ListingRequest::default(), &paginator).unwrap();
        assert_eq!(all.total_items, 2);

        let rust = list(&store, Some("rust"), &ListingRequest::default(), &paginator).unwrap();
        assert_eq!(rust.items.len(), 1);
        assert_eq!(rust.items[0].post.title, "Ownership");
        assert_eq!(rust.items[0].category, "Rust");
    }

    #[test]
    fn list_searches_content() {
        let mut store = store();
        post(&mut store, "Ownership", "rust", true);
        post(&mut store, "Decorators", "python-tips", true);

        let found = list(
            &store,
            None,
            &ListingRequest::query("about decor"),
            &Paginator::new(3),
        )
        .unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].post.slug, "decorators");
    }

    #[test]
    fn unknown_category_is_not_found() {
        let store = store();
        let result = list(&store, Some("go"), &ListingRequest::default(), &Paginator::new(3));
        assert!(matches!(result, Err(ShowcaseError::NotFound { .. })));
    }

    #[test]
    fn drafts_cannot_be_viewed() {
        let mut store = store();
        let slug = post(&mut store, "Lifetimes", "rust", false);
        assert!(matches!(
            view(&store, &slug),
            Err(ShowcaseError::NotFound { .. })
        ));
        let slug = post(&mut store, "Ownership", "rust", true);
        assert_eq!(view(&store, &slug).unwrap().category, "Rust");
    }

    #[test]
    fn categories_in_use_are_protected() {
        let mut store = store();
        post(&mut store, "Ownership", "rust", true);
        assert!(matches!(
            delete_category(&mut store, "rust"),
            Err(ShowcaseError::Protected(_))
        ));
        delete_category(&mut store, "python-tips").unwrap();
        assert_eq!(list_categories(&store).unwrap().len(), 1);
    }
}
