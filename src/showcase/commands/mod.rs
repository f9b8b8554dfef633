//! # Commands
//!
//! Business logic, one module per area. Every function takes the store it
//! needs (`&S` to read, `&mut S` to write) plus plain Rust arguments, and
//! returns plain Rust types: [`listing::Listing`] pages for list views,
//! detail structs for single records, and [`CmdResult`] for mutations.

use crate::model::{short_id, Record};
use serde::Serialize;
use uuid::Uuid;

pub mod blog;
pub mod gallery;
pub mod helpers;
pub mod listing;
pub mod menu;
pub mod pages;
pub mod profiles;
pub mod projects;
pub mod reviews;
pub mod tags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A record touched by a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affected {
    pub kind: &'static str,
    pub id: Uuid,
    pub label: String,
}

impl Affected {
    pub fn of<R: Record>(record: &R, label: impl Into<String>) -> Self {
        Self {
            kind: R::KIND,
            id: record.id(),
            label: label.into(),
        }
    }

    pub fn short_id(&self) -> String {
        short_id(&self.id)
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub affected: Vec<Affected>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_affected(&mut self, affected: Affected) {
        self.affected.push(affected);
    }

    pub fn with_affected(mut self, affected: Affected) -> Self {
        self.affected.push(affected);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Id of the first affected record, typically the one just created.
    pub fn first_id(&self) -> Option<Uuid> {
        self.affected.first().map(|a| a.id)
    }
}
