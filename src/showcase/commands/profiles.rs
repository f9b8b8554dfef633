use super::listing::{self, Listing, ListingRequest};
use super::projects::{cards, ProjectCard};
use super::{Affected, CmdMessage, CmdResult};
use crate::error::{Result, ShowcaseError};
use crate::forms::{clean_optional, ProfileForm};
use crate::model::devsearch::DEFAULT_PROFILE_IMAGE;
use crate::model::{Profile, Project, Review};
use crate::paginate::Paginator;
use crate::search::Searchable;
use crate::store::RecordStore;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

impl Searchable for Profile {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(info) = &self.short_info {
            fields.push(info);
        }
        fields
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetail {
    pub profile: Profile,
    pub projects: Vec<ProjectCard>,
}

pub fn list<S: RecordStore>(
    store: &S,
    request: &ListingRequest,
    paginator: &Paginator,
) -> Result<Listing<Profile>> {
    let profiles = store.find_all::<Profile>()?;
    Ok(listing::build(profiles, request, paginator))
}

pub fn view<S: RecordStore>(store: &S, id: &Uuid) -> Result<ProfileDetail> {
    let profile = store.find_by_id::<Profile>(id)?;
    let projects = store.filter::<Project, _>(|p| p.owner == Some(profile.id))?;
    let projects = cards(store, projects)?;
    Ok(ProfileDetail { profile, projects })
}

fn apply_form<S: RecordStore>(store: &S, profile: &mut Profile, form: ProfileForm) -> Result<()> {
    form.validate()?;
    let username = form.username.trim().to_string();
    let taken = store.find_one::<Profile, _>(|p| p.id != profile.id && p.username == username)?;
    if taken.is_some() {
        return Err(ShowcaseError::Duplicate(format!("username '{}'", username)));
    }

    profile.name = form.name.trim().to_string();
    profile.username = username;
    profile.email = clean_optional(form.email);
    profile.bio = clean_optional(form.bio);
    profile.short_info = clean_optional(form.short_info);
    profile.profile_image =
        clean_optional(form.profile_image).unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string());
    profile.social_github = clean_optional(form.social_github);
    profile.social_youtube = clean_optional(form.social_youtube);
    profile.social_website = clean_optional(form.social_website);
    Ok(())
}

pub fn create<S: RecordStore>(store: &mut S, form: ProfileForm) -> Result<CmdResult> {
    let mut profile = Profile::new("", "");
    apply_form(store, &mut profile, form)?;
    store.save(&profile)?;
    info!(profile = %profile.id, "created profile");

    Ok(CmdResult::default()
        .with_affected(Affected::of(&profile, &profile.name))
        .with_message(CmdMessage::success(format!(
            "Created profile {}",
            profile.username
        ))))
}

pub fn update<S: RecordStore>(store: &mut S, id: &Uuid, form: ProfileForm) -> Result<CmdResult> {
    let mut profile = store.find_by_id::<Profile>(id)?;
    apply_form(store, &mut profile, form)?;
    store.save(&profile)?;

    Ok(CmdResult::default()
        .with_affected(Affected::of(&profile, &profile.name))
        .with_message(CmdMessage::success(format!(
            "Updated profile {}",
            profile.username
        ))))
}

/// Deletes a profile. Its projects stay, ownerless; its reviews go, and the
/// projects they voted on are recounted.
///
/// The recount runs last: if it fails the profile and its reviews are already
/// gone, and the next vote or delete touching those projects recounts them.
pub fn delete<S: RecordStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let profile = store.find_by_id::<Profile>(id)?;
    let mut result = CmdResult::default().with_affected(Affected::of(&profile, &profile.name));

    for mut project in store.filter::<Project, _>(|p| p.owner == Some(profile.id))? {
        project.owner = None;
        store.save(&project)?;
        result.add_affected(Affected::of(&project, &project.title));
    }

    let reviews = store.filter::<Review, _>(|r| r.owner == profile.id)?;
    for review in &reviews {
        store.delete::<Review>(&review.id)?;
    }
    store.delete::<Profile>(&profile.id)?;
    info!(profile = %profile.id, reviews = reviews.len(), "deleted profile");

    let mut voted: Vec<Uuid> = reviews.iter().map(|r| r.project).collect();
    voted.sort();
    voted.dedup();
    for project in &voted {
        super::reviews::tally(store, project)?;
    }

    result.add_message(CmdMessage::success(format!(
        "Deleted profile {}",
        profile.username
    )));
    Ok(result)
}
