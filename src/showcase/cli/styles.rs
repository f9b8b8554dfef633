use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Shown in front of text whose style name is not in the theme, to catch
/// template typos.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub mod names {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const META: &str = "meta";
    pub const MUTED: &str = "muted";
    pub const HEADING: &str = "heading";
    pub const LABEL: &str = "label";
    pub const PRICE: &str = "price";
    pub const PAGE: &str = "page";
    pub const CURRENT_PAGE: &str = "current_page";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

/// Named styles applied by the `style` template filter.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.clone().force_styling(true).apply_to(text).to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }

    /// Like [`Theme::apply`] without ANSI codes.
    pub fn apply_plain(&self, name: &str, text: &str) -> String {
        if self.has(name) {
            text.to_string()
        } else {
            format!("{} {}", MISSING_STYLE_INDICATOR, text)
        }
    }
}

pub static SHOWCASE_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::ID, Style::new().yellow())
        .add(names::TITLE, Style::new().bold())
        .add(names::META, Style::new().cyan())
        .add(names::MUTED, Style::new().color256(246).italic())
        .add(names::HEADING, Style::new().bold().underlined())
        .add(names::LABEL, Style::new().dim())
        .add(names::PRICE, Style::new().green())
        .add(names::PAGE, Style::new())
        .add(names::CURRENT_PAGE, Style::new().bold().reverse())
        .add(names::INFO, Style::new().blue())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red().bold())
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_keeps_text() {
        assert_eq!(SHOWCASE_THEME.apply_plain(names::TITLE, "Engine"), "Engine");
    }

    #[test]
    fn unknown_styles_are_flagged() {
        assert_eq!(SHOWCASE_THEME.apply_plain("titel", "Engine"), "(!?) Engine");
        assert!(SHOWCASE_THEME.apply("titel", "Engine").starts_with("(!?)"));
    }

    #[test]
    fn colored_mode_emits_ansi() {
        let styled = SHOWCASE_THEME.apply(names::ERROR, "boom");
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("boom"));
    }
}
