use super::listing::{self, Listing, ListingRequest};
use super::{tags, Affected, CmdMessage, CmdResult};
use crate::error::Result;
use crate::forms::{clean_optional, ProjectForm};
use crate::model::devsearch::DEFAULT_PROJECT_IMAGE;
use crate::model::{Profile, Project, Review, Tag};
use crate::paginate::Paginator;
use crate::search::Searchable;
use crate::store::RecordStore;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// A project with its owner's name and tags resolved, as shown in listings.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub project: Project,
    pub owner_name: Option<String>,
    pub tags: Vec<Tag>,
}

impl Searchable for ProjectCard {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.project.title.as_str()];
        fields.extend(self.tags.iter().map(|t| t.name.as_str()));
        fields
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntry {
    pub review: Review,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub owner: Option<Profile>,
    pub tags: Vec<Tag>,
    pub reviews: Vec<ReviewEntry>,
}

pub(crate) fn cards<S: RecordStore>(store: &S, projects: Vec<Project>) -> Result<Vec<ProjectCard>> {
    let profiles: HashMap<Uuid, String> = store
        .find_all::<Profile>()?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();
    let all_tags = store.find_all::<Tag>()?;

    Ok(projects
        .into_iter()
        .map(|project| {
            let owner_name = project.owner.and_then(|id| profiles.get(&id).cloned());
            let tags = all_tags
                .iter()
                .filter(|t| project.tags.contains(&t.id))
                .cloned()
                .collect();
            ProjectCard {
                project,
                owner_name,
                tags,
            }
        })
        .collect())
}

/// Projects matching the query by title or tag name, best rated first.
pub fn list<S: RecordStore>(
    store: &S,
    request: &ListingRequest,
    paginator: &Paginator,
) -> Result<Listing<ProjectCard>> {
    let projects = store.find_all::<Project>()?;
    let cards = cards(store, projects)?;
    Ok(listing::build(cards, request, paginator))
}

pub fn view<S: RecordStore>(store: &S, id: &Uuid) -> Result<ProjectDetail> {
    let project = store.find_by_id::<Project>(id)?;
    let profiles: HashMap<Uuid, Profile> = store
        .find_all::<Profile>()?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let owner = project.owner.and_then(|id| profiles.get(&id).cloned());
    let tags = store.filter::<Tag, _>(|t| project.tags.contains(&t.id))?;
    let reviews = store
        .filter::<Review, _>(|r| r.project == project.id)?
        .into_iter()
        .map(|review| ReviewEntry {
            author: profiles.get(&review.owner).map(|p| p.name.clone()),
            review,
        })
        .collect();

    Ok(ProjectDetail {
        project,
        owner,
        tags,
        reviews,
    })
}

fn apply_form<S: RecordStore>(store: &S, project: &mut Project, form: ProjectForm) -> Result<()> {
    form.validate()?;
    let tag_ids = tags::resolve_names(store, &form.tags)?;

    project.title = form.title.trim().to_string();
    project.description = clean_optional(form.description);
    project.featured_image =
        clean_optional(form.featured_image).unwrap_or_else(|| DEFAULT_PROJECT_IMAGE.to_string());
    project.demo_link = clean_optional(form.demo_link);
    project.source_link = clean_optional(form.source_link);
    project.tags = tag_ids;
    Ok(())
}

pub fn create<S: RecordStore>(
    store: &mut S,
    owner: Option<Uuid>,
    form: ProjectForm,
) -> Result<CmdResult> {
    if let Some(owner) = owner {
        store.find_by_id::<Profile>(&owner)?;
    }

    let mut project = Project::new("");
    project.owner = owner;
    apply_form(store, &mut project, form)?;
    store.save(&project)?;
    info!(project = %project.id, "created project");

    Ok(CmdResult::default()
        .with_affected(Affected::of(&project, &project.title))
        .with_message(CmdMessage::success(format!(
            "Created project {}",
            project.title
        ))))
}

/// Replaces a project's editable fields. Votes and owner are kept.
pub fn update<S: RecordStore>(store: &mut S, id: &Uuid, form: ProjectForm) -> Result<CmdResult> {
    let mut project = store.find_by_id::<Project>(id)?;
    apply_form(store, &mut project, form)?;
    store.save(&project)?;

    Ok(CmdResult::default()
        .with_affected(Affected::of(&project, &project.title))
        .with_message(CmdMessage::success(format!(
            "Updated project {}",
            project.title
        ))))
}

/// Deletes a project together with its reviews.
pub fn delete<S: RecordStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let project = store.find_by_id::<Project>(id)?;
    let reviews = store.filter::<Review, _>(|r| r.project == project.id)?;
    for review in &reviews {
        store.delete::<Review>(&review.id)?;
    }
    store.delete::<Project>(&project.id)?;
    info!(project = %project.id, reviews = reviews.len(), "deleted project");

    let mut result = CmdResult::default().with_affected(Affected::of(&project, &project.title));
    result.add_message(CmdMessage::success(format!(
        "Deleted project {}",
        project.title
    )));
    if !reviews.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Removed {} review(s)",
            reviews.len()
        )));
    }
    Ok(result)
}
