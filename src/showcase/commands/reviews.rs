//! Voting.
//!
//! A vote is a [`Review`] row; the project's `vote_total` and `vote_ratio`
//! are recomputed from all of its reviews after every vote. The recount is a
//! read-modify-write of the project, so it is retried when another writer
//! saved the project in between. A vote whose recount still fails is taken
//! back, so the counts never miss a stored review and the voter can retry.
//!
//! The store enforces one review per profile and project on save; the lookup
//! below only gives the common case a friendlier message.

use super::{Affected, CmdMessage, CmdResult};
use crate::error::{Result, ShowcaseError};
use crate::forms::{clean_optional, ReviewForm};
use crate::model::{Profile, Project, Review, VoteTally};
use crate::store::RecordStore;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Attempts made to store a recount before giving up.
pub const MAX_TALLY_ATTEMPTS: usize = 5;

/// Records `owner`'s vote on a project and recounts it.
///
/// Each profile votes once per project.
pub fn vote<S: RecordStore>(
    store: &mut S,
    project_id: &Uuid,
    owner_id: &Uuid,
    form: ReviewForm,
) -> Result<CmdResult> {
    let value = form.validate()?;
    let project = store.find_by_id::<Project>(project_id)?;
    let voter = store.find_by_id::<Profile>(owner_id)?;

    let existing = store.find_one::<Review, _>(|r| r.project == project.id && r.owner == voter.id)?;
    if existing.is_some() {
        return Err(ShowcaseError::Duplicate(format!(
            "{} already reviewed {}",
            voter.name, project.title
        )));
    }

    let mut review = Review::new(voter.id, project.id, value);
    review.body = clean_optional(form.body);
    store.save(&review)?;

    let project = match tally(store, &project.id) {
        Ok(project) => project,
        Err(e) => {
            warn!(project = %project.id, voter = %voter.id, error = %e, "recount failed, withdrawing vote");
            store.delete::<Review>(&review.id)?;
            return Err(e);
        }
    };
    info!(project = %project.id, voter = %voter.id, value = %value, "recorded vote");
    Ok(CmdResult::default()
        .with_affected(Affected::of(&project, &project.title))
        .with_message(CmdMessage::success(format!(
            "Your review was submitted: {}% positive of {} vote(s)",
            project.vote_ratio, project.vote_total
        ))))
}

/// Recounts a project's votes from its reviews and stores the result.
pub fn tally<S: RecordStore>(store: &mut S, project_id: &Uuid) -> Result<Project> {
    let mut attempt = 1;
    loop {
        let mut project = store.find_by_id::<Project>(project_id)?;
        let reviews = store.filter::<Review, _>(|r| r.project == project.id)?;
        let counts = VoteTally::from_reviews(&reviews);
        project.apply_tally(counts);

        match store.save(&project) {
            Ok(()) => {
                debug!(project = %project.id, up = counts.up, down = counts.down, "tallied votes");
                return store.find_by_id::<Project>(project_id);
            }
            Err(e) if e.is_version_conflict() && attempt < MAX_TALLY_ATTEMPTS => {
                warn!(project = %project.id, attempt, "vote tally conflicted, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Reviews on a project, newest first.
pub fn list_for_project<S: RecordStore>(store: &S, project_id: &Uuid) -> Result<Vec<Review>> {
    store.find_by_id::<Project>(project_id)?;
    store.filter::<Review, _>(|r| r.project == *project_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{RacingStore, StoreFixture};
    use crate::model::VoteValue;

    fn up() -> ReviewForm {
        ReviewForm {
            body: None,
            value: "up".into(),
        }
    }

    fn down() -> ReviewForm {
        ReviewForm {
            body: Some("  needs docs ".into()),
            value: "down".into(),
        }
    }

    fn voters(fixture: StoreFixture, n: usize) -> StoreFixture {
        (0..n).fold(fixture, |f, i| f.with_profile(&format!("Voter {}", i)))
    }

    #[test]
    fn three_up_one_down_is_75_percent() {
        let mut fixture = voters(StoreFixture::new().with_project("Engine", &[]), 4);
        let project = fixture.project("Engine").id;

        for i in 0..3 {
            let voter = fixture.profile(&format!("Voter {}", i)).id;
            vote(&mut fixture.store, &project, &voter, up()).unwrap();
        }
        let voter = fixture.profile("Voter 3").id;
        vote(&mut fixture.store, &project, &voter, down()).unwrap();

        let stored = fixture.store.find_by_id::<Project>(&project).unwrap();
        assert_eq!(stored.vote_total, 4);
        assert_eq!(stored.vote_ratio, 75);
    }

    #[test]
    fn tally_without_reviews_is_zero() {
        let mut fixture = StoreFixture::new().with_project("Quiet", &[]);
        let id = fixture.project("Quiet").id;
        let project = tally(&mut fixture.store, &id).unwrap();
        assert_eq!(project.vote_total, 0);
        assert_eq!(project.vote_ratio, 0);
    }

    #[test]
    fn second_vote_by_same_profile_is_rejected() {
        let mut fixture = voters(StoreFixture::new().with_project("Engine", &[]), 1);
        let project = fixture.project("Engine").id;
        let voter = fixture.profile("Voter 0").id;

        vote(&mut fixture.store, &project, &voter, up()).unwrap();
        let err = vote(&mut fixture.store, &project, &voter, down()).unwrap_err();
        assert!(matches!(err, ShowcaseError::Duplicate(_)));

        let stored = fixture.store.find_by_id::<Project>(&project).unwrap();
        assert_eq!(stored.vote_total, 1);
        assert_eq!(stored.vote_ratio, 100);
    }

    #[test]
    fn invalid_value_is_a_validation_error() {
        let mut fixture = voters(StoreFixture::new().with_project("Engine", &[]), 1);
        let project = fixture.project("Engine").id;
        let voter = fixture.profile("Voter 0").id;
        let form = ReviewForm {
            body: None,
            value: "maybe".into(),
        };
        match vote(&mut fixture.store, &project, &voter, form) {
            Err(ShowcaseError::Validation(errors)) => assert!(errors.has("value")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(fixture.store.find_all::<Review>().unwrap().is_empty());
    }

    #[test]
    fn review_body_is_trimmed() {
        let mut fixture = voters(StoreFixture::new().with_project("Engine", &[]), 1);
        let project = fixture.project("Engine").id;
        let voter = fixture.profile("Voter 0").id;
        vote(&mut fixture.store, &project, &voter, down()).unwrap();

        let reviews = list_for_project(&fixture.store, &project).unwrap();
        assert_eq!(reviews[0].body.as_deref(), Some("needs docs"));
    }

    fn racing(conflicts: usize) -> (RacingStore, Uuid) {
        let fixture = StoreFixture::new().with_voted_project("Busy", 3, 1);
        let id = fixture.project("Busy").id;
        let mut project = fixture.project("Busy");
        project.vote_ratio = 0;
        project.vote_total = 0;
        let mut inner = fixture.store;
        inner.save(&project).unwrap();
        (RacingStore::new(inner, conflicts), id)
    }

    #[test]
    fn tally_retries_after_conflicts() {
        let (mut store, id) = racing(2);
        let project = tally(&mut store, &id).unwrap();
        assert_eq!(project.vote_ratio, 75);
        assert_eq!(project.vote_total, 4);
    }

    #[test]
    fn tally_gives_up_after_max_attempts() {
        let (mut store, id) = racing(MAX_TALLY_ATTEMPTS);
        let err = tally(&mut store, &id).unwrap_err();
        assert!(err.is_version_conflict());
    }

    #[test]
    fn failed_recount_withdraws_the_vote() {
        let (mut store, id) = racing(MAX_TALLY_ATTEMPTS);
        let ada = Profile::new("Ada", "ada");
        store.inner.save(&ada).unwrap();

        let err = vote(&mut store, &id, &ada.id, up()).unwrap_err();
        assert!(err.is_version_conflict());
        let left = store.inner.find_one::<Review, _>(|r| r.owner == ada.id).unwrap();
        assert!(left.is_none());

        // Once the contention is gone the same voter gets through
        vote(&mut store, &id, &ada.id, up()).unwrap();
        let stored = store.inner.find_by_id::<Project>(&id).unwrap();
        assert_eq!(stored.vote_total, 5);
        assert_eq!(stored.vote_ratio, 80);
    }

    #[test]
    fn store_rejects_a_second_review_even_without_the_lookup() {
        let mut fixture = voters(StoreFixture::new().with_project("Engine", &[]), 1);
        let project = fixture.project("Engine").id;
        let voter = fixture.profile("Voter 0").id;
        vote(&mut fixture.store, &project, &voter, up()).unwrap();

        let again = Review::new(voter, project, VoteValue::Down);
        let err = fixture.store.save(&again).unwrap_err();
        assert!(matches!(err, ShowcaseError::Duplicate(_)));
        assert_eq!(list_for_project(&fixture.store, &project).unwrap().len(), 1);
    }
}
