use super::helpers::{assign_slug, find_by_slug};
use super::{Affected, CmdMessage, CmdResult};
use crate::error::{Result, ShowcaseError};
use crate::forms::{clean_optional, CategoryForm, MenuItemForm};
use crate::model::{MenuCategory, MenuItem};
use crate::store::RecordStore;
use serde::Serialize;
use tracing::info;

const NAME_MAX: usize = 100;

/// One category of the menu with its dishes.
#[derive(Debug, Clone, Serialize)]
pub struct MenuSection {
    pub category: MenuCategory,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dish {
    pub item: MenuItem,
    pub category: MenuCategory,
    pub display_name: String,
}

/// Active categories in menu order, each with its active items by name.
/// Categories without active items are left out.
pub fn menu<S: RecordStore>(store: &S) -> Result<Vec<MenuSection>> {
    let items = store.filter::<MenuItem, _>(|i| i.is_active)?;
    Ok(store
        .filter::<MenuCategory, _>(|c| c.is_active)?
        .into_iter()
        .map(|category| MenuSection {
            items: items
                .iter()
                .filter(|i| i.category == category.id)
                .cloned()
                .collect(),
            category,
        })
        .filter(|section| !section.items.is_empty())
        .collect())
}

pub fn view_item<S: RecordStore>(store: &S, slug: &str) -> Result<Dish> {
    let item = find_by_slug::<MenuItem, S>(store, slug)?;
    let category = store.find_by_id::<MenuCategory>(&item.category)?;
    Ok(Dish {
        display_name: item.display_name(&category),
        item,
        category,
    })
}

pub fn create_category<S: RecordStore>(store: &mut S, form: CategoryForm) -> Result<CmdResult> {
    form.validate(NAME_MAX, NAME_MAX)?;
    let name = form.name.trim();
    if store
        .find_one::<MenuCategory, _>(|c| c.name == name)?
        .is_some()
    {
        return Err(ShowcaseError::Duplicate(format!("menu category '{}'", name)));
    }

    let mut category = MenuCategory::new(name, "");
    category.slug = assign_slug::<MenuCategory, S>(
        store,
        clean_optional(form.slug).as_deref(),
        &category.name,
        NAME_MAX,
        category.id,
    )?;
    category.order = form.order;
    category.is_active = form.is_active;
    store.save(&category)?;

    Ok(CmdResult::default()
        .with_affected(Affected::of(&category, &category.slug))
        .with_message(CmdMessage::success(format!(
            "Created menu category {}",
            category.name
        ))))
}

pub fn create_item<S: RecordStore>(store: &mut S, form: MenuItemForm) -> Result<CmdResult> {
    let price = form.validate()?;
    let category = find_by_slug::<MenuCategory, S>(store, form.category.trim())?;

    let mut item = MenuItem::new(category.id, form.name.trim(), "", price);
    item.slug = assign_slug::<MenuItem, S>(
        store,
        clean_optional(form.slug).as_deref(),
        &item.name,
        NAME_MAX,
        item.id,
    )?;
    item.description = form.description;
    item.image = clean_optional(form.image);
    item.is_active = form.is_active;
    store.save(&item)?;
    info!(item = %item.id, price, "created menu item");

    Ok(CmdResult::default()
        .with_affected(Affected::of(&item, &item.slug))
        .with_message(CmdMessage::success(format!(
            "Created {}",
            item.display_name(&category)
        ))))
}

/// Deletes a menu category and every item in it.
pub fn delete_category<S: RecordStore>(store: &mut S, slug: &str) -> Result<CmdResult> {
    let category = find_by_slug::<MenuCategory, S>(store, slug)?;
    let mut result = CmdResult::default().with_affected(Affected::of(&category, &category.slug));

    for item in store.filter::<MenuItem, _>(|i| i.category == category.id)? {
        store.delete::<MenuItem>(&item.id)?;
        result.add_affected(Affected::of(&item, &item.slug));
    }
    store.delete::<MenuCategory>(&category.id)?;

    result.add_message(CmdMessage::success(format!(
        "Deleted menu category {} and {} item(s)",
        category.name,
        result.affected.len() - 1
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn category(store: &mut InMemoryStore, name: &str, order: u32, active: bool) {
        let form = CategoryForm {
            name: name.into(),
            order,
            is_active: active,
            ..Default::default()
        };
        create_category(store, form).unwrap();
    }

    fn item(store: &mut InMemoryStore, category: &str, name: &str, price: &str) -> Result<CmdResult> {
        let form = MenuItemForm {
            category: category.into(),
            name: name.into(),
            price: price.into(),
            ..Default::default()
        };
        create_item(store, form)
    }

    fn store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        category(&mut store, "Desserts", 3, true);
        category(&mut store, "Breakfast", 1, true);
        category(&mut store, "Seasonal", 2, false);
        item(&mut store, "breakfast", "Pancakes", "6.50").unwrap();
        item(&mut store, "breakfast", "Omelette", "7").unwrap();
        item(&mut store, "desserts", "Tiramisu", "5.25").unwrap();
        item(&mut store, "seasonal", "Pumpkin soup", "4").unwrap();
        store
    }

    #[test]
    fn menu_groups_active_items_by_category_order() {
        let store = store();
        let sections = menu(&store).unwrap();
        let layout: Vec<(String, Vec<String>)> = sections
            .into_iter()
            .map(|s| {
                (
                    s.category.name,
                    s.items.into_iter().map(|i| i.name).collect(),
                )
            })
            .collect();
        assert_eq!(
            layout,
            vec![
                (
                    "Breakfast".to_string(),
                    vec!["Omelette".to_string(), "Pancakes".to_string()]
                ),
                ("Desserts".to_string(), vec!["Tiramisu".to_string()]),
            ]
        );
    }

    #[test]
    fn items_store_prices_in_cents() {
        let store = store();
        let dish = view_item(&store, "pancakes").unwrap();
        assert_eq!(dish.item.price, 650);
        assert_eq!(dish.display_name, "Pancakes (Breakfast)");
    }

    #[test]
    fn invalid_price_is_rejected() {
        let mut store = store();
        match item(&mut store, "breakfast", "Toast", "1.999") {
            Err(ShowcaseError::Validation(errors)) => assert!(errors.has("price")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn item_needs_an_existing_category() {
        let mut store = store();
        assert!(matches!(
            item(&mut store, "brunch", "Toast", "2"),
            Err(ShowcaseError::NotFound { .. })
        ));
    }

    #[test]
    fn category_names_are_unique() {
        let mut store = store();
        let form = CategoryForm {
            name: "Breakfast".into(),
            ..Default::default()
        };
        assert!(matches!(
            create_category(&mut store, form),
            Err(ShowcaseError::Duplicate(_))
        ));
    }

    #[test]
    fn item_slugs_are_unique_across_categories() {
        let mut store = store();
        let result = item(&mut store, "desserts", "Pancakes", "3").unwrap();
        assert_eq!(result.affected[0].label, "pancakes-2");
    }

    #[test]
    fn deleting_a_category_removes_its_items() {
        let mut store = store();
        let result = delete_category(&mut store, "breakfast").unwrap();
        assert_eq!(result.affected.len(), 3);
        assert!(view_item(&store, "pancakes").is_err());
        assert_eq!(store.find_all::<MenuItem>().unwrap().len(), 2);
    }
}
