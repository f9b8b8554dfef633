//! # Rendering Module
//!
//! Styled terminal output from the templates in `templates/`, through a
//! minijinja environment with a `style` filter backed by [`SHOWCASE_THEME`].
//! Colors are applied only when the caller asks for them (stdout is a terminal
//! and `--no-color` is absent); otherwise the filter returns plain text.
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they
//! need Unicode-aware processing. Templates pick styles and lay out lines.

use super::styles::{names, Theme, SHOWCASE_THEME};
use super::templates::TEMPLATES;
use chrono::{DateTime, Utc};
use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;
use showcase::commands::blog::{CategoryUsage, PostCard};
use showcase::commands::gallery::GalleryEntry;
use showcase::commands::listing::Listing;
use showcase::commands::menu::{Dish, MenuSection};
use showcase::commands::profiles::ProfileDetail;
use showcase::commands::projects::{ProjectCard, ProjectDetail};
use showcase::commands::tags::TagUsage;
use showcase::commands::{CmdMessage, MessageLevel};
use showcase::config::ShowcaseConfig;
use showcase::error::{Result, ShowcaseError};
use showcase::model::food::format_price;
use showcase::model::{short_id, GalleryCategory, Profile, Review, SitePage};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Total width of a listing row.
pub const LINE_WIDTH: usize = 80;
/// Width of the short id column.
pub const ID_WIDTH: usize = 8;
/// Width of the menu, from dish name to price.
pub const MENU_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 10;

#[derive(Serialize)]
struct RowData {
    id: String,
    title: String,
    padding: String,
    meta: String,
    detail: String,
    indent: String,
}

#[derive(Serialize)]
struct PagerToken {
    text: String,
    style: &'static str,
    sep: &'static str,
}

#[derive(Serialize)]
struct PagerData {
    tokens: Vec<PagerToken>,
    summary: String,
}

#[derive(Serialize)]
struct ListData {
    heading: String,
    query: String,
    empty: bool,
    empty_message: String,
    rows: Vec<RowData>,
    pager: Option<PagerData>,
}

#[derive(Serialize)]
struct FieldData {
    label: String,
    padding: String,
    value: String,
}

#[derive(Serialize)]
struct SectionData {
    title: String,
    lines: Vec<String>,
    empty: String,
}

#[derive(Serialize)]
struct DetailData {
    heading: String,
    fields: Vec<FieldData>,
    body: String,
    sections: Vec<SectionData>,
}

#[derive(Serialize)]
struct MenuLine {
    name: String,
    padding: String,
    price: String,
    description: String,
}

#[derive(Serialize)]
struct MenuSectionData {
    name: String,
    items: Vec<MenuLine>,
}

#[derive(Serialize)]
struct MenuData {
    sections: Vec<MenuSectionData>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

/// Renders command results with the embedded templates.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        register_style_filter(&mut env, &SHOWCASE_THEME, use_color);

        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| ShowcaseError::Api(format!("template {}: {}", name, e)))?;
        }
        Ok(Self { env })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> String {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(data))
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    fn list<T>(
        &self,
        heading: &str,
        empty_message: &str,
        rows: Vec<RowData>,
        listing: Option<&Listing<T>>,
    ) -> String {
        let data = ListData {
            heading: heading.to_string(),
            query: listing.map(|l| l.query_echo.clone()).unwrap_or_default(),
            empty: rows.is_empty(),
            empty_message: empty_message.to_string(),
            rows,
            pager: listing.map(pager),
        };
        self.render("list.jinja", &data)
    }

    fn detail(&self, data: DetailData) -> String {
        self.render("detail.jinja", &data)
    }

    pub fn projects(&self, listing: &Listing<ProjectCard>) -> String {
        let rows = listing
            .items
            .iter()
            .map(|card| {
                let project = &card.project;
                let mut detail = Vec::new();
                if let Some(owner) = &card.owner_name {
                    detail.push(format!("by {}", owner));
                }
                if !card.tags.is_empty() {
                    detail.push(tag_list(card.tags.iter().map(|t| t.name.as_str())));
                }
                row(
                    &short_id(&project.id),
                    &project.title,
                    &vote_summary(project.vote_ratio, project.vote_total),
                    detail.join("  "),
                )
            })
            .collect();
        self.list("Projects", "No projects found.", rows, Some(listing))
    }

    pub fn project(&self, detail: &ProjectDetail) -> String {
        let project = &detail.project;
        let mut fields = vec![
            field("Id", project.id.to_string()),
            field(
                "Votes",
                vote_summary(project.vote_ratio, project.vote_total),
            ),
        ];
        if let Some(owner) = &detail.owner {
            fields.push(field("Owner", format!("{} (@{})", owner.name, owner.username)));
        }
        if !detail.tags.is_empty() {
            fields.push(field(
                "Tags",
                tag_list(detail.tags.iter().map(|t| t.name.as_str())),
            ));
        }
        if let Some(link) = &project.demo_link {
            fields.push(field("Demo", link.clone()));
        }
        if let Some(link) = &project.source_link {
            fields.push(field("Source", link.clone()));
        }
        fields.push(field("Image", project.featured_image.clone()));
        fields.push(field("Created", format_time_ago(project.created)));

        let reviews = detail
            .reviews
            .iter()
            .map(|entry| {
                let author = entry.author.as_deref().unwrap_or("(deleted)");
                match &entry.review.body {
                    Some(body) => format!("{:<4} {}: {}", entry.review.value.as_str(), author, body),
                    None => format!("{:<4} {}", entry.review.value.as_str(), author),
                }
            })
            .collect();

        self.detail(DetailData {
            heading: project.title.clone(),
            fields,
            body: project.description.clone().unwrap_or_default(),
            sections: vec![section("Reviews", reviews, "No reviews yet.")],
        })
    }

    pub fn reviews(&self, reviews: &[Review]) -> String {
        let rows = reviews
            .iter()
            .map(|review| {
                row(
                    &short_id(&review.id),
                    review.value.as_str(),
                    &format_time_ago(review.created),
                    review.body.clone().unwrap_or_default(),
                )
            })
            .collect();
        self.list::<()>("Reviews", "No reviews yet.", rows, None)
    }

    pub fn tags(&self, tags: &[TagUsage]) -> String {
        let rows = tags
            .iter()
            .map(|usage| {
                row(
                    &short_id(&usage.tag.id),
                    &usage.tag.name,
                    &count(usage.projects, "project"),
                    String::new(),
                )
            })
            .collect();
        self.list::<()>("Tags", "No tags yet.", rows, None)
    }

    pub fn profiles(&self, listing: &Listing<Profile>) -> String {
        let rows = listing
            .items
            .iter()
            .map(|profile| {
                row(
                    &short_id(&profile.id),
                    &profile.name,
                    &format!("@{}", profile.username),
                    profile.short_info.clone().unwrap_or_default(),
                )
            })
            .collect();
        self.list("Developers", "No developers found.", rows, Some(listing))
    }

    pub fn profile(&self, detail: &ProfileDetail) -> String {
        let profile = &detail.profile;
        let mut fields = vec![
            field("Id", profile.id.to_string()),
            field("Username", format!("@{}", profile.username)),
        ];
        let optional = [
            ("Email", &profile.email),
            ("Headline", &profile.short_info),
            ("GitHub", &profile.social_github),
            ("YouTube", &profile.social_youtube),
            ("Website", &profile.social_website),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                fields.push(field(label, value.clone()));
            }
        }
        fields.push(field("Image", profile.profile_image.clone()));
        fields.push(field("Joined", format_time_ago(profile.created)));

        let projects = detail
            .projects
            .iter()
            .map(|card| {
                format!(
                    "{}  {}  {}",
                    short_id(&card.project.id),
                    card.project.title,
                    vote_summary(card.project.vote_ratio, card.project.vote_total)
                )
            })
            .collect();

        self.detail(DetailData {
            heading: profile.name.clone(),
            fields,
            body: profile.bio.clone().unwrap_or_default(),
            sections: vec![section("Projects", projects, "No projects yet.")],
        })
    }

    pub fn posts(&self, listing: &Listing<PostCard>) -> String {
        let rows = listing
            .items
            .iter()
            .map(|card| {
                row(
                    &short_id(&card.post.id),
                    &card.post.title,
                    &format_time_ago(card.post.time_created),
                    format!("{} in {}", card.post.slug, card.category),
                )
            })
            .collect();
        self.list("Posts", "No posts found.", rows, Some(listing))
    }

    pub fn post(&self, card: &PostCard) -> String {
        let post = &card.post;
        let mut fields = vec![
            field("Slug", post.slug.clone()),
            field("Category", card.category.clone()),
            field("Published", format_time_ago(post.time_created)),
        ];
        if post.time_updated > post.time_created {
            fields.push(field("Updated", format_time_ago(post.time_updated)));
        }
        if let Some(photo) = &post.photo {
            fields.push(field("Photo", photo.clone()));
        }
        self.detail(DetailData {
            heading: post.title.clone(),
            fields,
            body: post.content.clone(),
            sections: Vec::new(),
        })
    }

    pub fn blog_categories(&self, categories: &[CategoryUsage]) -> String {
        let rows = categories
            .iter()
            .map(|usage| {
                row(
                    &short_id(&usage.category.id),
                    &usage.category.name,
                    &count(usage.posts, "post"),
                    usage.category.slug.clone(),
                )
            })
            .collect();
        self.list::<()>("Categories", "No categories yet.", rows, None)
    }

    pub fn menu(&self, sections: &[MenuSection]) -> String {
        let sections = sections
            .iter()
            .map(|section| MenuSectionData {
                name: section.category.name.clone(),
                items: section
                    .items
                    .iter()
                    .map(|item| {
                        let price = format_price(item.price);
                        // Two spaces of indent in the template
                        let available = MENU_WIDTH.saturating_sub(price.width() + 3);
                        let name = truncate_to_width(&item.name, available);
                        let padding = " ".repeat(available.saturating_sub(name.width()) + 1);
                        MenuLine {
                            name,
                            padding,
                            price,
                            description: item.description.clone(),
                        }
                    })
                    .collect(),
            })
            .collect();
        self.render("menu.jinja", &MenuData { sections })
    }

    pub fn dish(&self, dish: &Dish) -> String {
        let item = &dish.item;
        let mut fields = vec![
            field("Slug", item.slug.clone()),
            field("Category", dish.category.name.clone()),
            field("Price", format_price(item.price)),
            field("Available", if item.is_active { "yes" } else { "no" }.to_string()),
        ];
        if let Some(image) = &item.image {
            fields.push(field("Image", image.clone()));
        }
        self.detail(DetailData {
            heading: dish.display_name.clone(),
            fields,
            body: item.description.clone(),
            sections: Vec::new(),
        })
    }

    pub fn gallery(&self, entries: &[GalleryEntry]) -> String {
        let rows = entries
            .iter()
            .map(|entry| {
                let mut detail = entry.image.image.clone();
                if entry.image.is_featured {
                    detail.push_str("  featured");
                }
                row(
                    &short_id(&entry.image.id),
                    &entry.title,
                    entry.category.as_deref().unwrap_or("uncategorized"),
                    detail,
                )
            })
            .collect();
        self.list::<()>("Gallery", "No photos found.", rows, None)
    }

    pub fn gallery_categories(&self, categories: &[GalleryCategory]) -> String {
        let rows = categories
            .iter()
            .map(|category| {
                row(
                    &short_id(&category.id),
                    &category.name,
                    &category.slug,
                    String::new(),
                )
            })
            .collect();
        self.list::<()>("Gallery categories", "No categories yet.", rows, None)
    }

    pub fn pages(&self, pages: &[SitePage]) -> String {
        let rows = pages
            .iter()
            .map(|page| row(&short_id(&page.id), &page.page_name, &page.title, String::new()))
            .collect();
        self.list::<()>("Pages", "No pages yet.", rows, None)
    }

    pub fn page(&self, page: &SitePage) -> String {
        self.detail(DetailData {
            heading: page.title.clone(),
            fields: Vec::new(),
            body: page.about.clone(),
            sections: Vec::new(),
        })
    }

    pub fn config(&self, config: &ShowcaseConfig) -> String {
        self.detail(DetailData {
            heading: "Configuration".to_string(),
            fields: vec![
                field("data_dir", config.data_dir().display().to_string()),
                field("page_size", config.page_size().to_string()),
            ],
            body: String::new(),
            sections: Vec::new(),
        })
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }
        let messages = messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect();
        self.render("messages.jinja", &MessagesData { messages })
    }
}

/// Registers the `style` filter on a minijinja environment.
fn register_style_filter(env: &mut Environment<'static>, theme: &Theme, use_color: bool) {
    let theme = theme.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        if use_color {
            theme.apply(&name, &text)
        } else {
            theme.apply_plain(&name, &text)
        }
    });
}

fn row(id: &str, title: &str, meta: &str, detail: String) -> RowData {
    let available = LINE_WIDTH.saturating_sub(ID_WIDTH + 2 + meta.width() + 2);
    let title = truncate_to_width(title, available);
    let padding = " ".repeat(available.saturating_sub(title.width()) + 2);
    RowData {
        id: format!("{:<width$}", id, width = ID_WIDTH),
        title,
        padding,
        meta: meta.to_string(),
        detail: truncate_to_width(&detail, LINE_WIDTH - ID_WIDTH - 2),
        indent: " ".repeat(ID_WIDTH + 2),
    }
}

fn field(label: &str, value: String) -> FieldData {
    FieldData {
        label: label.to_string(),
        padding: " ".repeat(LABEL_WIDTH.saturating_sub(label.width()).max(1)),
        value,
    }
}

fn section(title: &str, lines: Vec<String>, empty: &str) -> SectionData {
    SectionData {
        title: title.to_string(),
        lines,
        empty: empty.to_string(),
    }
}

/// The page window line: `« 1 [2] 3 4 »`, then a summary.
fn pager<T>(listing: &Listing<T>) -> PagerData {
    let mut tokens = Vec::new();
    if listing.has_previous() {
        tokens.push(PagerToken {
            text: "«".to_string(),
            style: names::MUTED,
            sep: " ",
        });
    }
    for number in listing.page_window.iter() {
        let current = number == listing.current_page;
        tokens.push(PagerToken {
            text: if current {
                format!("[{}]", number)
            } else {
                number.to_string()
            },
            style: if current {
                names::CURRENT_PAGE
            } else {
                names::PAGE
            },
            sep: " ",
        });
    }
    if listing.has_next() {
        tokens.push(PagerToken {
            text: "»".to_string(),
            style: names::MUTED,
            sep: " ",
        });
    }
    if let Some(last) = tokens.last_mut() {
        last.sep = "\n";
    }

    PagerData {
        tokens,
        summary: format!(
            "Page {} of {}, {}",
            listing.current_page,
            listing.total_pages,
            count(listing.total_items, "result")
        ),
    }
}

fn vote_summary(ratio: u32, total: u32) -> String {
    format!("{}% of {}", ratio, count(total as usize, "vote"))
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

fn tag_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.map(|n| format!("#{}", n)).collect::<Vec<_>>().join(" ")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
