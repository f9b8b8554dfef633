//! URL slug generation.
//!
//! Slugs are lowercase words joined by single hyphens. Letters and digits from
//! any script are kept, so "Завтраки" stays "завтраки" rather than collapsing
//! to an empty string; every other symbol is dropped.

/// Converts free text into a slug.
///
/// ```
/// use showcase::slug::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Rust -- the  Book "), "rust-the-book");
/// assert_eq!(slugify("Завтраки и обеды"), "завтраки-и-обеды");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else if ch == '-' || ch.is_whitespace() {
            pending_dash = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Truncates a slug to at most `max_chars` characters without leaving a trailing hyphen.
pub fn truncate_slug(slug: &str, max_chars: usize) -> String {
    let truncated: String = slug.chars().take(max_chars).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Returns `base` if free, otherwise the first free `base-2`, `base-3`, ...
///
/// An empty `base` is replaced by `fallback`.
pub fn unique_slug<F>(base: &str, fallback: &str, max_chars: usize, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base = if base.is_empty() { fallback } else { base };
    let base = truncate_slug(base, max_chars);

    if !is_taken(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let suffix = format!("-{}", n);
        let stem = truncate_slug(&base, max_chars.saturating_sub(suffix.chars().count()));
        let candidate = format!("{}{}", stem, suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
