use crate::error::{Result, ShowcaseError};
use crate::model::{short_id, Record, Slugged};
use crate::slug::{slugify, unique_slug};
use crate::store::RecordStore;
use uuid::Uuid;

/// Shortest id prefix accepted from users.
pub const MIN_ID_PREFIX: usize = 4;

/// Resolves user input to a record id.
///
/// Accepts a full UUID (with or without hyphens) or a unique prefix of the
/// hyphen-less form, e.g. the 8 characters shown in listings.
pub fn resolve_id<R: Record, S: RecordStore>(store: &S, input: &str) -> Result<Uuid> {
    let input = input.trim().to_lowercase();
    if let Ok(id) = Uuid::parse_str(&input) {
        return Ok(id);
    }

    let prefix = input.replace('-', "");
    if prefix.len() < MIN_ID_PREFIX || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ShowcaseError::not_found(R::KIND, &input));
    }

    let matches: Vec<Uuid> = store
        .find_all::<R>()?
        .iter()
        .map(Record::id)
        .filter(|id| id.simple().to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(ShowcaseError::not_found(R::KIND, &input)),
        _ => Err(ShowcaseError::Ambiguous(format!(
            "{} matches {} {}s",
            input,
            matches.len(),
            R::KIND
        ))),
    }
}

/// Looks up a record by id or id prefix.
pub fn find<R: Record, S: RecordStore>(store: &S, input: &str) -> Result<R> {
    let id = resolve_id::<R, S>(store, input)?;
    store.find_by_id(&id)
}

pub fn find_by_slug<R: Record + Slugged, S: RecordStore>(store: &S, slug: &str) -> Result<R> {
    store
        .find_one::<R, _>(|r| r.slug() == slug)?
        .ok_or_else(|| ShowcaseError::not_found(R::KIND, slug))
}

/// Picks the slug for a new record.
///
/// An explicitly requested slug must be free. Otherwise one is generated from
/// `source`, de-duplicated with a numeric suffix.
pub fn assign_slug<R: Record + Slugged, S: RecordStore>(
    store: &S,
    requested: Option<&str>,
    source: &str,
    max_chars: usize,
    own_id: Uuid,
) -> Result<String> {
    let existing: Vec<String> = store
        .filter::<R, _>(|r| r.id() != own_id)?
        .iter()
        .map(|r| r.slug().to_string())
        .collect();
    let taken = |slug: &str| existing.iter().any(|s| s == slug);

    match requested {
        Some(slug) if taken(slug) => Err(ShowcaseError::Duplicate(format!(
            "{} with slug '{}'",
            R::KIND,
            slug
        ))),
        Some(slug) => Ok(slug.to_string()),
        None => {
            let fallback = format!("{}-{}", R::KIND.replace(' ', "-"), short_id(&own_id));
            Ok(unique_slug(&slugify(source), &fallback, max_chars, taken))
        }
    }
}
