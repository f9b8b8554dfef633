use super::{Affected, CmdMessage, CmdResult};
use crate::error::{Result, ShowcaseError};
use crate::forms::SitePageForm;
use crate::model::SitePage;
use crate::store::RecordStore;

pub fn list<S: RecordStore>(store: &S) -> Result<Vec<SitePage>> {
    store.find_all::<SitePage>()
}

pub fn show<S: RecordStore>(store: &S, page_name: &str) -> Result<SitePage> {
    let name = page_name.trim();
    store
        .find_one::<SitePage, _>(|p| p.page_name == name)?
        .ok_or_else(|| ShowcaseError::not_found("page", name))
}

/// Creates the page or replaces its title and text.
pub fn set<S: RecordStore>(store: &mut S, form: SitePageForm) -> Result<CmdResult> {
    form.validate()?;
    let name = form.page_name.trim();

    let (page, verb) = match store.find_one::<SitePage, _>(|p| p.page_name == name)? {
        Some(mut page) => {
            page.title = form.title.trim().to_string();
            page.about = form.about;
            (page, "Updated")
        }
        None => (
            SitePage::new(name, form.title.trim(), form.about),
            "Created",
        ),
    };
    store.save(&page)?;

    Ok(CmdResult::default()
        .with_affected(Affected::of(&page, &page.page_name))
        .with_message(CmdMessage::success(format!(
            "{} page {}",
            verb, page.page_name
        ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn form(name: &str, title: &str, about: &str) -> SitePageForm {
        SitePageForm {
            page_name: name.into(),
            title: title.into(),
            about: about.into(),
        }
    }

    #[test]
    fn missing_page_is_not_found() {
        let store = InMemoryStore::new();
        assert!(matches!(
            show(&store, "about"),
            Err(ShowcaseError::NotFound { kind: "page", .. })
        ));
    }

    #[test]
    fn set_creates_then_updates() {
        let mut store = InMemoryStore::new();
        let created = set(&mut store, form("about", "About us", "Family kitchen")).unwrap();
        assert_eq!(created.messages[0].content, "Created page about");

        let updated = set(&mut store, form("about", "About", "Since 1998")).unwrap();
        assert_eq!(updated.messages[0].content, "Updated page about");

        let page = show(&store, " about ").unwrap();
        assert_eq!(page.title, "About");
        assert_eq!(page.about, "Since 1998");
        assert_eq!(list(&store).unwrap().len(), 1);
    }

    #[test]
    fn about_text_is_required() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            set(&mut store, form("contacts", "Contacts", "")),
            Err(ShowcaseError::Validation(_))
        ));
    }
}
