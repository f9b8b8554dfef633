//! # Forms
//!
//! Input structs for every create/update operation. A form is validated as a
//! whole before anything is persisted, and all field problems are collected
//! into a single [`FormErrors`] so a UI can show them next to the fields.
//!
//! Forms only check what can be checked without the store (required fields,
//! lengths, formats). Uniqueness and references to other records are checked
//! by the commands.

use crate::error::Result;
use crate::model::VoteValue;
use serde::Serialize;
use std::collections::BTreeMap;

pub const REQUIRED: &str = "This field is required.";

/// Field name to error messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }

    fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, REQUIRED);
        }
    }

    fn max_len(&mut self, field: &str, value: &str, max: usize) {
        let len = value.chars().count();
        if len > max {
            self.add(
                field,
                format!(
                    "Ensure this value has at most {} characters (it has {}).",
                    max, len
                ),
            );
        }
    }

    fn optional_max_len(&mut self, field: &str, value: &Option<String>, max: usize) {
        if let Some(v) = value {
            self.max_len(field, v, max);
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Trims an optional text input; blank becomes `None`.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

fn is_valid_email(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((user, domain)) => {
            !user.is_empty()
                && !user.contains(char::is_whitespace)
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn check_slug(errors: &mut FormErrors, slug: &Option<String>, max: usize) {
    if let Some(slug) = slug {
        if !is_valid_slug(slug) {
            errors.add(
                "slug",
                "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
            );
        }
        errors.max_len("slug", slug, max);
    }
}

pub const MAX_PRICE_DIGITS: usize = 8;
pub const PRICE_DECIMAL_PLACES: usize = 2;

/// Parses a non-negative decimal price ("12", "12.5", "12.50") into cents.
pub fn parse_price(raw: &str) -> std::result::Result<u64, String> {
    let raw = raw.trim();
    if raw.starts_with('-') {
        return Err("Ensure this value is greater than or equal to 0.".to_string());
    }

    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err("Enter a number.".to_string());
    }
    if fraction.len() > PRICE_DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {} decimal places.",
            PRICE_DECIMAL_PLACES
        ));
    }

    let whole = whole.trim_start_matches('0');
    if whole.len() + PRICE_DECIMAL_PLACES > MAX_PRICE_DIGITS {
        return Err(format!(
            "Ensure that there are no more than {} digits in total.",
            MAX_PRICE_DIGITS
        ));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| "Enter a number.".to_string())?
    };
    let cents: u64 = format!("{:0<2}", fraction)
        .parse()
        .map_err(|_| "Enter a number.".to_string())?;
    Ok(whole * 100 + cents)
}

#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub title: String,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub demo_link: Option<String>,
    pub source_link: Option<String>,
    /// Tag names; each must name an existing tag.
    pub tags: Vec<String>,
}

impl ProjectForm {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FormErrors::new();
        errors.required("title", &self.title);
        errors.max_len("title", &self.title, 200);
        errors.optional_max_len("demo_link", &self.demo_link, 2000);
        errors.optional_max_len("source_link", &self.source_link, 2000);
        errors.optional_max_len("featured_image", &self.featured_image, 255);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: Option<String>,
    pub username: String,
    pub bio: Option<String>,
    pub short_info: Option<String>,
    pub profile_image: Option<String>,
    pub social_github: Option<String>,
    pub social_youtube: Option<String>,
    pub social_website: Option<String>,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FormErrors::new();
        errors.required("name", &self.name);
        errors.max_len("name", &self.name, 200);
        errors.required("username", &self.username);
        errors.max_len("username", &self.username, 200);
        if self.username.contains(char::is_whitespace) {
            errors.add("username", "Enter a valid username without spaces.");
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                errors.add("email", "Enter a valid email address.");
            }
            errors.max_len("email", email, 500);
        }
        errors.optional_max_len("short_info", &self.short_info, 200);
        errors.optional_max_len("social_github", &self.social_github, 200);
        errors.optional_max_len("social_youtube", &self.social_youtube, 200);
        errors.optional_max_len("social_website", &self.social_website, 200);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewForm {
    pub body: Option<String>,
    pub value: String,
}

impl ReviewForm {
    pub fn validate(&self) -> Result<VoteValue> {
        if self.value.trim().is_empty() {
            return Err(FormErrors::single("value", REQUIRED).into());
        }
        self.value
            .parse::<VoteValue>()
            .map_err(|message| FormErrors::single("value", message).into())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagForm {
    pub name: String,
}

impl TagForm {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FormErrors::new();
        errors.required("name", &self.name);
        errors.max_len("name", self.name.trim(), 200);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub slug: Option<String>,
    pub content: String,
    pub photo: Option<String>,
    pub is_published: bool,
    /// Slug of an existing blog category.
    pub category: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FormErrors::new();
        errors.required("title", &self.title);
        errors.max_len("title", &self.title, 200);
        check_slug(&mut errors, &self.slug, 255);
        errors.required("category", &self.category);
        errors.into_result()
    }
}

/// Category input shared by the blog, the menu and the gallery.
#[derive(Debug, Clone)]
pub struct CategoryForm {
    pub name: String,
    pub slug: Option<String>,
    pub order: u32,
    pub is_active: bool,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: None,
            order: 0,
            is_active: true,
        }
    }
}

impl CategoryForm {
    pub fn validate(&self, name_max: usize, slug_max: usize) -> Result<()> {
        let mut errors = FormErrors::new();
        errors.required("name", &self.name);
        errors.max_len("name", &self.name, name_max);
        check_slug(&mut errors, &self.slug, slug_max);
        errors.into_result()
    }
}

#[derive(Debug, Clone)]
pub struct MenuItemForm {
    /// Slug of an existing menu category.
    pub category: String,
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    pub price: String,
    pub image: Option<String>,
    pub is_active: bool,
}

impl Default for MenuItemForm {
    fn default() -> Self {
        Self {
            category: String::new(),
            name: String::new(),
            slug: None,
            description: String::new(),
            price: String::new(),
            image: None,
            is_active: true,
        }
    }
}

impl MenuItemForm {
    /// Validates the form and returns the price in cents.
    pub fn validate(&self) -> Result<u64> {
        let mut errors = FormErrors::new();
        errors.required("category", &self.category);
        errors.required("name", &self.name);
        errors.max_len("name", &self.name, 100);
        check_slug(&mut errors, &self.slug, 100);

        let price = if self.price.trim().is_empty() {
            errors.add("price", REQUIRED);
            None
        } else {
            match parse_price(&self.price) {
                Ok(cents) => Some(cents),
                Err(message) => {
                    errors.add("price", message);
                    None
                }
            }
        };

        match (errors.into_result(), price) {
            (Ok(()), Some(cents)) => Ok(cents),
            (Err(e), _) => Err(e),
            (Ok(()), None) => Err(FormErrors::single("price", REQUIRED).into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryImageForm {
    /// Slug of an existing gallery category, if any.
    pub category: Option<String>,
    pub title: String,
    pub image: String,
    pub description: String,
    pub is_featured: bool,
}

impl GalleryImageForm {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FormErrors::new();
        errors.max_len("title", &self.title, 200);
        errors.required("image", &self.image);
        errors.max_len("image", &self.image, 255);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SitePageForm {
    pub page_name: String,
    pub title: String,
    pub about: String,
}

impl SitePageForm {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FormErrors::new();
        errors.required("page_name", &self.page_name);
        errors.max_len("page_name", &self.page_name, 100);
        errors.required("title", &self.title);
        errors.max_len("title", &self.title, 100);
        errors.required("about", &self.about);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShowcaseError;

    fn field_errors(result: Result<()>) -> FormErrors {
        match result {
            Err(ShowcaseError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn project_title_is_required() {
        let errors = field_errors(ProjectForm::default().validate());
        assert_eq!(errors.get("title"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn project_title_length_is_limited() {
        let form = ProjectForm {
            title: "x".repeat(201),
            ..Default::default()
        };
        let errors = field_errors(form.validate());
        assert_eq!(
            errors.get("title").unwrap()[0],
            "Ensure this value has at most 200 characters (it has 201)."
        );
    }

    #[test]
    fn collects_errors_from_every_field() {
        let form = ProfileForm {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        let errors = field_errors(form.validate());
        assert!(errors.has("name"));
        assert!(errors.has("username"));
        assert!(errors.has("email"));
        assert!(errors.to_string().contains("email: Enter a valid email address."));
    }

    #[test]
    fn valid_profile_passes() {
        let form = ProfileForm {
            name: "Ada".into(),
            username: "ada".into(),
            email: Some("ada@example.com".into()),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn review_value_must_be_a_choice() {
        let form = ReviewForm {
            body: None,
            value: "sideways".into(),
        };
        assert!(matches!(form.validate(), Err(ShowcaseError::Validation(_))));

        let form = ReviewForm {
            body: None,
            value: "up".into(),
        };
        assert_eq!(form.validate().unwrap(), VoteValue::Up);
    }

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price("12"), Ok(1200));
        assert_eq!(parse_price("12.5"), Ok(1250));
        assert_eq!(parse_price("0.99"), Ok(99));
        assert_eq!(parse_price(".5"), Ok(50));
        assert_eq!(parse_price("999999.99"), Ok(99_999_999));
        assert!(parse_price("1000000").is_err());
        assert!(parse_price("-1").is_err());
        assert!(parse_price("1.234").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price(".").is_err());
    }

    #[test]
    fn menu_item_returns_cents() {
        let form = MenuItemForm {
            category: "drinks".into(),
            name: "Lemonade".into(),
            price: "3.20".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap(), 320);
    }

    #[test]
    fn menu_item_reports_price_and_name_together() {
        let form = MenuItemForm {
            category: "drinks".into(),
            price: "-3".into(),
            ..Default::default()
        };
        match form.validate() {
            Err(ShowcaseError::Validation(errors)) => {
                assert!(errors.has("name"));
                assert!(errors.has("price"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn slugs_must_be_slug_shaped() {
        let form = PostForm {
            title: "Hello".into(),
            slug: Some("hello world".into()),
            category: "news".into(),
            ..Default::default()
        };
        assert!(field_errors(form.validate()).has("slug"));
    }

    #[test]
    fn clean_optional_blanks_to_none() {
        assert_eq!(clean_optional(Some("  ".into())), None);
        assert_eq!(clean_optional(Some(" x ".into())), Some("x".into()));
        assert_eq!(clean_optional(None), None);
    }
}
