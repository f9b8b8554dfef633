//! Developer showcase records: profiles, projects, tags and reviews.

use super::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_PROFILE_IMAGE: &str = "profiles/user-default.png";
pub const DEFAULT_PROJECT_IMAGE: &str = "default.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub name: String,
    pub email: Option<String>,
    pub username: String,
    pub bio: Option<String>,
    pub short_info: Option<String>,
    pub profile_image: String,
    pub social_github: Option<String>,
    pub social_youtube: Option<String>,
    pub social_website: Option<String>,
    pub created: DateTime<Utc>,
}

impl Profile {
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            name: name.into(),
            email: None,
            username: username.into(),
            bio: None,
            short_info: None,
            profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
            social_github: None,
            social_youtube: None,
            social_website: None,
            created: Utc::now(),
        }
    }
}

impl_record!(Profile, "profile", "profiles", |a, b| a
    .created
    .cmp(&b.created)
    .then_with(|| a.name.cmp(&b.name)), unique |p| vec![format!("username '{}'", p.username)]);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub name: String,
    pub created: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            name: name.into(),
            created: Utc::now(),
        }
    }
}

impl_record!(Tag, "tag", "tags", |a, b| a
    .name
    .to_lowercase()
    .cmp(&b.name.to_lowercase()), unique |t| vec![format!("name '{}'", t.name.to_lowercase())]);

/// A showcased project.
///
/// `vote_total` and `vote_ratio` are denormalized from the project's reviews and
/// rewritten by [`crate::commands::reviews::tally`] after every vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub owner: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub featured_image: String,
    pub demo_link: Option<String>,
    pub source_link: Option<String>,
    #[serde(default)]
    pub tags: Vec<Uuid>,
    pub vote_total: u32,
    pub vote_ratio: u32,
    pub created: DateTime<Utc>,
}

impl Project {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            owner: None,
            title: title.into(),
            description: None,
            featured_image: DEFAULT_PROJECT_IMAGE.to_string(),
            demo_link: None,
            source_link: None,
            tags: Vec::new(),
            vote_total: 0,
            vote_ratio: 0,
            created: Utc::now(),
        }
    }

    pub fn apply_tally(&mut self, tally: VoteTally) {
        self.vote_total = tally.total();
        self.vote_ratio = tally.ratio();
    }
}

// Highest rated first, busier projects break ties, then alphabetical.
impl_record!(Project, "project", "projects", |a, b| b
    .vote_ratio
    .cmp(&a.vote_ratio)
    .then_with(|| b.vote_total.cmp(&a.vote_total))
    .then_with(|| a.title.cmp(&b.title)));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteValue::Up => "up",
            VoteValue::Down => "down",
        }
    }
}

impl std::fmt::Display for VoteValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "+" | "+1" => Ok(VoteValue::Up),
            "down" | "-" | "-1" => Ok(VoteValue::Down),
            other => Err(format!(
                "Select a valid choice. {} is not one of the available choices.",
                other
            )),
        }
    }
}

/// A vote with an optional comment. Unique per (owner, project).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    pub owner: Uuid,
    pub project: Uuid,
    pub body: Option<String>,
    pub value: VoteValue,
    pub created: DateTime<Utc>,
}

impl Review {
    pub fn new(owner: Uuid, project: Uuid, value: VoteValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            owner,
            project,
            body: None,
            value,
            created: Utc::now(),
        }
    }
}

impl_record!(Review, "review", "reviews", |a, b| b.created.cmp(&a.created),
    unique |r| vec![format!("owner {} and project {}", r.owner, r.project)]);

/// Up/down vote counts for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub up: u32,
    pub down: u32,
}

impl VoteTally {
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        reviews
            .into_iter()
            .fold(VoteTally::default(), |mut tally, review| {
                match review.value {
                    VoteValue::Up => tally.up += 1,
                    VoteValue::Down => tally.down += 1,
                }
                tally
            })
    }

    pub fn total(&self) -> u32 {
        self.up + self.down
    }

    /// Percentage of up votes, rounded half away from zero. Zero when nobody voted.
    pub fn ratio(&self) -> u32 {
        let total = self.total() as u64;
        if total == 0 {
            return 0;
        }
        ((200 * self.up as u64 + total) / (2 * total)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sort_records, Record};

    fn tally(up: u32, down: u32) -> VoteTally {
        VoteTally { up, down }
    }

    #[test]
    fn ratio_of_three_up_one_down_is_75() {
        assert_eq!(tally(3, 1).ratio(), 75);
        assert_eq!(tally(3, 1).total(), 4);
    }

    #[test]
    fn ratio_without_votes_is_zero() {
        assert_eq!(tally(0, 0).ratio(), 0);
        assert_eq!(tally(0, 0).total(), 0);
    }

    #[test]
    fn ratio_rounds_to_nearest() {
        assert_eq!(tally(1, 2).ratio(), 33);
        assert_eq!(tally(2, 1).ratio(), 67);
        assert_eq!(tally(1, 7).ratio(), 13);
        assert_eq!(tally(0, 5).ratio(), 0);
        assert_eq!(tally(5, 0).ratio(), 100);
    }

    #[test]
    fn tally_counts_review_values() {
        let project = Uuid::new_v4();
        let reviews = vec![
            Review::new(Uuid::new_v4(), project, VoteValue::Up),
            Review::new(Uuid::new_v4(), project, VoteValue::Down),
            Review::new(Uuid::new_v4(), project, VoteValue::Up),
        ];
        assert_eq!(VoteTally::from_reviews(&reviews), tally(2, 1));
    }

    #[test]
    fn projects_order_by_ratio_then_total_then_title() {
        let mut a = Project::new("Beta");
        a.vote_ratio = 50;
        a.vote_total = 2;
        let mut b = Project::new("Alpha");
        b.vote_ratio = 50;
        b.vote_total = 2;
        let mut c = Project::new("Gamma");
        c.vote_ratio = 90;
        let mut d = Project::new("Delta");
        d.vote_ratio = 50;
        d.vote_total = 10;

        let mut projects = vec![a, b, c, d];
        sort_records(&mut projects);
        let titles: Vec<_> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Gamma", "Delta", "Alpha", "Beta"]);
    }

    #[test]
    fn vote_value_parsing() {
        assert_eq!("up".parse::<VoteValue>(), Ok(VoteValue::Up));
        assert_eq!(" Down ".parse::<VoteValue>(), Ok(VoteValue::Down));
        assert!("sideways".parse::<VoteValue>().is_err());
    }

    #[test]
    fn new_records_start_unversioned() {
        assert_eq!(Project::new("x").version(), 0);
        assert_eq!(Tag::new("rust").version(), 0);
    }
}
