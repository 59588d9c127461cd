//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Tags, locations
//! and item lists are shared by several independent flows; all of them go
//! through the add-and-resort helpers below instead of sorting copies.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{ItemList, Location, Named, Tag};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All tags, sorted by name
    pub tags: Vec<Tag>,
    /// All locations, sorted by name
    pub locations: Vec<Location>,
    /// All item lists, sorted by name
    pub lists: Vec<ItemList>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Collection Helpers
// ========================

/// Case-insensitive by name, id breaks ties
pub fn sort_by_name<T: Named>(entries: &mut [T]) {
    entries.sort_by(|a, b| {
        a.name()
            .to_lowercase()
            .cmp(&b.name().to_lowercase())
            .then(a.id().cmp(&b.id()))
    });
}

/// Insert or replace by id, then re-sort
pub fn add_and_resort<T: Named>(entries: &mut Vec<T>, entry: T) {
    match entries.iter_mut().find(|e| e.id() == entry.id()) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
    sort_by_name(entries);
}

/// Case-insensitive exact name lookup
pub fn find_by_name<'a, T: Named>(entries: &'a [T], name: &str) -> Option<&'a T> {
    let needle = name.trim().to_lowercase();
    entries.iter().find(|e| e.name().to_lowercase() == needle)
}

pub fn name_of<T: Named>(entries: &[T], id: u32) -> Option<String> {
    entries.iter().find(|e| e.id() == id).map(|e| e.name().to_string())
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_tags(store: &AppStore, mut tags: Vec<Tag>) {
    sort_by_name(&mut tags);
    *store.tags().write() = tags;
}

pub fn store_add_tag(store: &AppStore, tag: Tag) {
    add_and_resort(&mut *store.tags().write(), tag);
}

pub fn store_set_locations(store: &AppStore, mut locations: Vec<Location>) {
    sort_by_name(&mut locations);
    *store.locations().write() = locations;
}

pub fn store_add_location(store: &AppStore, location: Location) {
    add_and_resort(&mut *store.locations().write(), location);
}

pub fn store_set_lists(store: &AppStore, mut lists: Vec<ItemList>) {
    sort_by_name(&mut lists);
    *store.lists().write() = lists;
}

/// Add a new list or replace an updated one
pub fn store_put_list(store: &AppStore, list: ItemList) {
    add_and_resort(&mut *store.lists().write(), list);
}

pub fn store_remove_list(store: &AppStore, list_id: u32) {
    store.lists().write().retain(|list| list.id != list_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: u32, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            color: None,
        }
    }

    #[test]
    fn test_add_and_resort_keeps_order() {
        let mut tags = vec![tag(1, "Garten"), tag(2, "werkzeug")];
        add_and_resort(&mut tags, tag(3, "Elektro"));
        add_and_resort(&mut tags, tag(4, "küche"));
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Elektro", "Garten", "küche", "werkzeug"]);
    }

    #[test]
    fn test_add_same_id_twice_is_idempotent() {
        let mut tags = vec![tag(1, "Garten")];
        add_and_resort(&mut tags, tag(2, "Keller"));
        add_and_resort(&mut tags, tag(2, "Keller"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_find_by_name_ignores_case_and_spaces() {
        let tags = vec![tag(1, "Garten"), tag(2, "Werkzeug")];
        assert_eq!(find_by_name(&tags, "  werkZEUG ").map(|t| t.id), Some(2));
        assert!(find_by_name(&tags, "Werk").is_none());
    }

    #[test]
    fn test_name_of() {
        let tags = vec![tag(5, "Büro")];
        assert_eq!(name_of(&tags, 5).as_deref(), Some("Büro"));
        assert_eq!(name_of(&tags, 6), None);
    }
}
