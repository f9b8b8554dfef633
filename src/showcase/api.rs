//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every showcase operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: user-typed ids and id prefixes become UUIDs, raw
//!   `query`/`page` strings become a [`ListingRequest`]
//! - **Carries configuration**: the page size every listing uses
//!
//! It does no business logic (that is `commands/*.rs`), no I/O and no
//! formatting; it returns plain data structures.
//!
//! ## Ids
//!
//! Users may type a full UUID or a unique prefix of at least
//! [`helpers::MIN_ID_PREFIX`] hex digits, usually the 8 shown in listings.
//! Unknown prefixes are `NotFound`, prefixes matching several records are
//! `Ambiguous`. Blog posts, categories and dishes are addressed by slug.
//!
//! ## Generic Over RecordStore
//!
//! `ShowcaseApi<S: RecordStore>` is generic over the storage backend:
//! - Production: `ShowcaseApi<FileStore>`
//! - Testing: `ShowcaseApi<InMemoryStore>`

use crate::commands::gallery::{GalleryEntry, GalleryFilter};
use crate::commands::listing::{Listing, ListingRequest};
use crate::commands::{
    blog, gallery, helpers, menu, pages, profiles, projects, reviews, tags, CmdResult,
};
use crate::config::ShowcaseConfig;
use crate::error::Result;
use crate::forms::{
    CategoryForm, GalleryImageForm, MenuItemForm, PostForm, ProfileForm, ProjectForm, ReviewForm,
    SitePageForm, TagForm,
};
use crate::model::{GalleryCategory, Profile, Project, Review, SitePage};
use crate::paginate::Paginator;
use crate::store::RecordStore;

/// The main API facade for showcase operations.
pub struct ShowcaseApi<S: RecordStore> {
    store: S,
    config: ShowcaseConfig,
    paginator: Paginator,
}

impl<S: RecordStore> ShowcaseApi<S> {
    pub fn new(store: S, config: ShowcaseConfig) -> Self {
        let paginator = Paginator::new(config.page_size());
        Self {
            store,
            config,
            paginator,
        }
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Projects ---

    pub fn list_projects(
        &self,
        query: Option<String>,
        page: Option<String>,
    ) -> Result<Listing<projects::ProjectCard>> {
        let request = ListingRequest::new(query, page);
        projects::list(&self.store, &request, &self.paginator)
    }

    pub fn view_project(&self, id: &str) -> Result<projects::ProjectDetail> {
        let id = helpers::resolve_id::<Project, S>(&self.store, id)?;
        projects::view(&self.store, &id)
    }

    pub fn create_project(&mut self, owner: Option<&str>, form: ProjectForm) -> Result<CmdResult> {
        let owner = owner
            .map(|o| helpers::resolve_id::<Profile, S>(&self.store, o))
            .transpose()?;
        projects::create(&mut self.store, owner, form)
    }

    pub fn update_project(&mut self, id: &str, form: ProjectForm) -> Result<CmdResult> {
        let id = helpers::resolve_id::<Project, S>(&self.store, id)?;
        projects::update(&mut self.store, &id, form)
    }

    pub fn delete_project(&mut self, id: &str) -> Result<CmdResult> {
        let id = helpers::resolve_id::<Project, S>(&self.store, id)?;
        projects::delete(&mut self.store, &id)
    }

    pub fn vote(&mut self, project: &str, voter: &str, form: ReviewForm) -> Result<CmdResult> {
        let project = helpers::resolve_id::<Project, S>(&self.store, project)?;
        let voter = helpers::resolve_id::<Profile, S>(&self.store, voter)?;
        reviews::vote(&mut self.store, &project, &voter, form)
    }

    pub fn project_reviews(&self, project: &str) -> Result<Vec<Review>> {
        let project = helpers::resolve_id::<Project, S>(&self.store, project)?;
        reviews::list_for_project(&self.store, &project)
    }

    // --- Tags ---

    pub fn list_tags(&self) -> Result<Vec<tags::TagUsage>> {
        tags::list(&self.store)
    }

    pub fn create_tag(&mut self, form: TagForm) -> Result<CmdResult> {
        tags::create(&mut self.store, form)
    }

    pub fn delete_tag(&mut self, name: &str) -> Result<CmdResult> {
        tags::delete(&mut self.store, name)
    }

    // --- Profiles ---

    pub fn list_profiles(
        &self,
        query: Option<String>,
        page: Option<String>,
    ) -> Result<Listing<Profile>> {
        let request = ListingRequest::new(query, page);
        profiles::list(&self.store, &request, &self.paginator)
    }

    pub fn view_profile(&self, id: &str) -> Result<profiles::ProfileDetail> {
        let id = helpers::resolve_id::<Profile, S>(&self.store, id)?;
        profiles::view(&self.store, &id)
    }

    pub fn create_profile(&mut self, form: ProfileForm) -> Result<CmdResult> {
        profiles::create(&mut self.store, form)
    }

    pub fn update_profile(&mut self, id: &str, form: ProfileForm) -> Result<CmdResult> {
        let id = helpers::resolve_id::<Profile, S>(&self.store, id)?;
        profiles::update(&mut self.store, &id, form)
    }

    pub fn delete_profile(&mut self, id: &str) -> Result<CmdResult> {
        let id = helpers::resolve_id::<Profile, S>(&self.store, id)?;
        profiles::delete(&mut self.store, &id)
    }

    // --- Blog ---

    pub fn list_posts(
        &self,
        category: Option<&str>,
        query: Option<String>,
        page: Option<String>,
    ) -> Result<Listing<blog::PostCard>> {
        let request = ListingRequest::new(query, page);
        blog::list(&self.store, category, &request, &self.paginator)
    }

    pub fn view_post(&self, slug: &str) -> Result<blog::PostCard> {
        blog::view(&self.store, slug)
    }

    pub fn create_post(&mut self, form: PostForm) -> Result<CmdResult> {
        blog::create_post(&mut self.store, form)
    }

    pub fn list_blog_categories(&self) -> Result<Vec<blog::CategoryUsage>> {
        blog::list_categories(&self.store)
    }

    pub fn create_blog_category(&mut self, form: CategoryForm) -> Result<CmdResult> {
        blog::create_category(&mut self.store, form)
    }

    pub fn delete_blog_category(&mut self, slug: &str) -> Result<CmdResult> {
        blog::delete_category(&mut self.store, slug)
    }

    // --- Menu ---

    pub fn menu(&self) -> Result<Vec<menu::MenuSection>> {
        menu::menu(&self.store)
    }

    pub fn view_dish(&self, slug: &str) -> Result<menu::Dish> {
        menu::view_item(&self.store, slug)
    }

    pub fn create_menu_category(&mut self, form: CategoryForm) -> Result<CmdResult> {
        menu::create_category(&mut self.store, form)
    }

    pub fn create_menu_item(&mut self, form: MenuItemForm) -> Result<CmdResult> {
        menu::create_item(&mut self.store, form)
    }

    pub fn delete_menu_category(&mut self, slug: &str) -> Result<CmdResult> {
        menu::delete_category(&mut self.store, slug)
    }

    // --- Gallery ---

    pub fn gallery(&self, filter: &GalleryFilter) -> Result<Vec<GalleryEntry>> {
        gallery::list(&self.store, filter)
    }

    pub fn gallery_categories(&self) -> Result<Vec<GalleryCategory>> {
        gallery::list_categories(&self.store)
    }

    pub fn create_gallery_category(&mut self, form: CategoryForm) -> Result<CmdResult> {
        gallery::create_category(&mut self.store, form)
    }

    pub fn add_gallery_image(&mut self, form: GalleryImageForm) -> Result<CmdResult> {
        gallery::add_image(&mut self.store, form)
    }

    pub fn delete_gallery_category(&mut self, slug: &str) -> Result<CmdResult> {
        gallery::delete_category(&mut self.store, slug)
    }

    // --- Pages ---

    pub fn list_pages(&self) -> Result<Vec<SitePage>> {
        pages::list(&self.store)
    }

    pub fn show_page(&self, name: &str) -> Result<SitePage> {
        pages::show(&self.store, name)
    }

    pub fn set_page(&mut self, form: SitePageForm) -> Result<CmdResult> {
        pages::set(&mut self.store, form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShowcaseError;
    use crate::model::short_id;
    use crate::store::memory::fixtures::StoreFixture;

    fn api(fixture: StoreFixture, page_size: usize) -> ShowcaseApi<crate::store::memory::InMemoryStore> {
        let config = ShowcaseConfig {
            page_size,
            ..Default::default()
        };
        ShowcaseApi::new(fixture.store, config)
    }

    #[test]
    fn listings_use_configured_page_size() {
        let listing = api(StoreFixture::new().with_projects(10), 4)
            .list_projects(None, Some("2".into()))
            .unwrap();
        assert_eq!(listing.items.len(), 4);
        assert_eq!(listing.total_pages, 3);
    }

    #[test]
    fn zero_page_size_behaves_as_one() {
        let listing = api(StoreFixture::new().with_projects(3), 0)
            .list_projects(None, None)
            .unwrap();
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.total_pages, 3);
    }

    #[test]
    fn short_ids_are_resolved() {
        let fixture = StoreFixture::new().with_project("Engine", &[]);
        let id = fixture.project("Engine").id;
        let api = api(fixture, 3);

        let detail = api.view_project(&short_id(&id)).unwrap();
        assert_eq!(detail.project.id, id);
    }

    #[test]
    fn vote_resolves_project_and_voter() {
        let fixture = StoreFixture::new()
            .with_project("Engine", &[])
            .with_profile("Ada");
        let project = short_id(&fixture.project("Engine").id);
        let voter = short_id(&fixture.profile("Ada").id);
        let mut api = api(fixture, 3);

        let form = ReviewForm {
            body: None,
            value: "up".into(),
        };
        api.vote(&project, &voter, form).unwrap();
        let detail = api.view_project(&project).unwrap();
        assert_eq!(detail.project.vote_ratio, 100);
        assert_eq!(api.project_reviews(&project).unwrap().len(), 1);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut api = api(StoreFixture::new().with_projects(1), 3);
        assert!(matches!(
            api.delete_project("00000000"),
            Err(ShowcaseError::NotFound { .. })
        ));
    }

    #[test]
    fn create_project_with_owner_prefix() {
        let fixture = StoreFixture::new().with_profile("Ada");
        let ada = fixture.profile("Ada").id;
        let mut api = api(fixture, 3);

        let form = ProjectForm {
            title: "Engine".into(),
            ..Default::default()
        };
        let result = api.create_project(Some(&short_id(&ada)), form).unwrap();
        let detail = api
            .view_project(&result.first_id().unwrap().to_string())
            .unwrap();
        assert_eq!(detail.owner.map(|p| p.id), Some(ada));
    }
}
