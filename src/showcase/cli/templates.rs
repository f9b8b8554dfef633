//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as standalone
//! files next to this module and embedded at compile time, so layouts can be
//! edited and diffed apart from the code.
//!
//! Templates are rendered with `trim_blocks` and `lstrip_blocks`: a line that
//! holds only a block tag produces no output. Lines that must join across a
//! loop get their separators from the data (see the pager `sep` field).
//!
//! Layout math (widths, truncation, padding) happens in `render.rs`; templates
//! only pick styles through the `style` filter.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.jinja");
pub const PAGER_TEMPLATE: &str = include_str!("templates/pager.jinja");
pub const DETAIL_TEMPLATE: &str = include_str!("templates/detail.jinja");
pub const MENU_TEMPLATE: &str = include_str!("templates/menu.jinja");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.jinja");

/// Name and source of every template, for registration.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("list.jinja", LIST_TEMPLATE),
    ("pager.jinja", PAGER_TEMPLATE),
    ("detail.jinja", DETAIL_TEMPLATE),
    ("menu.jinja", MENU_TEMPLATE),
    ("messages.jinja", MESSAGES_TEMPLATE),
];
