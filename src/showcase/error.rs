use crate::forms::FormErrors;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} {id} was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict {
        kind: &'static str,
        id: Uuid,
        expected: u64,
        found: u64,
    },

    #[error("Invalid input: {0}")]
    Validation(FormErrors),

    #[error("Already exists: {0}")]
    Duplicate(String),

    #[error("Cannot delete: {0}")]
    Protected(String),

    #[error("Ambiguous id: {0}")]
    Ambiguous(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl ShowcaseError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        ShowcaseError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_version_conflict(&self) -> bool {
        matches!(self, ShowcaseError::VersionConflict { .. })
    }
}

impl From<FormErrors> for ShowcaseError {
    fn from(errors: FormErrors) -> Self {
        ShowcaseError::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
