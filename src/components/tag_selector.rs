//! Tag Selector Component
//!
//! Combobox for picking tags, with an inline "create" entry for names that do
//! not exist yet. Selected tags are shown as chips in front of the input.

use leptos::html;
use leptos::prelude::*;

use crate::models::Tag;

#[derive(Debug, Clone, PartialEq)]
pub enum ComboEntry {
    Existing(Tag),
    Create(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboState {
    Closed,
    OpenEmpty,
    OpenFiltered,
    OpenWithCreate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboAction {
    None,
    Select(u32),
    Create(String),
    RemoveLast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboKey {
    Up,
    Down,
    Enter,
    Escape,
    Backspace,
    Other,
}

impl ComboKey {
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowUp" => ComboKey::Up,
            "ArrowDown" => ComboKey::Down,
            "Enter" => ComboKey::Enter,
            "Escape" => ComboKey::Escape,
            "Backspace" => ComboKey::Backspace,
            _ => ComboKey::Other,
        }
    }
}

/// Input text, open flag and highlighted entry of the combobox
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagCombo {
    input: String,
    open: bool,
    highlighted: Option<usize>,
}

impl TagCombo {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn set_input(&mut self, text: String) {
        self.input = text;
        self.open = true;
        self.highlighted = None;
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    /// Trimmed input when no tag has exactly this name (case-insensitive)
    fn create_candidate(&self, options: &[Tag]) -> Option<String> {
        let name = self.input.trim();
        if name.is_empty() {
            return None;
        }
        let lowered = name.to_lowercase();
        if options.iter().any(|t| t.name.to_lowercase() == lowered) {
            return None;
        }
        Some(name.to_string())
    }

    /// Entries shown in the dropdown, create entry last
    pub fn entries(&self, options: &[Tag], selected: &[u32]) -> Vec<ComboEntry> {
        let needle = self.input.trim().to_lowercase();
        let mut entries: Vec<ComboEntry> = options
            .iter()
            .filter(|t| !selected.contains(&t.id))
            .filter(|t| needle.is_empty() || t.name.to_lowercase().contains(&needle))
            .cloned()
            .map(ComboEntry::Existing)
            .collect();
        if let Some(name) = self.create_candidate(options) {
            entries.push(ComboEntry::Create(name));
        }
        entries
    }

    pub fn state(&self, options: &[Tag]) -> ComboState {
        if !self.open {
            ComboState::Closed
        } else if self.input.trim().is_empty() {
            ComboState::OpenEmpty
        } else if self.create_candidate(options).is_some() {
            ComboState::OpenWithCreate
        } else {
            ComboState::OpenFiltered
        }
    }

    /// Commit an entry: clears the input and keeps the list open for the next tag
    pub fn commit(&mut self, entry: &ComboEntry) -> ComboAction {
        self.input.clear();
        self.highlighted = None;
        match entry {
            ComboEntry::Existing(tag) => ComboAction::Select(tag.id),
            ComboEntry::Create(name) => ComboAction::Create(name.clone()),
        }
    }

    pub fn handle_key(&mut self, key: ComboKey, options: &[Tag], selected: &[u32]) -> ComboAction {
        match key {
            ComboKey::Down | ComboKey::Up => {
                self.open = true;
                let len = self.entries(options, selected).len();
                if len == 0 {
                    self.highlighted = None;
                    return ComboAction::None;
                }
                self.highlighted = Some(match (key, self.highlighted) {
                    (ComboKey::Down, None) => 0,
                    (ComboKey::Down, Some(i)) => (i + 1) % len,
                    (_, None) => len - 1,
                    (_, Some(i)) => (i + len - 1) % len,
                });
                ComboAction::None
            }
            ComboKey::Enter => {
                let entries = self.entries(options, selected);
                if let Some(entry) = self.highlighted.and_then(|i| entries.get(i)) {
                    let entry = entry.clone();
                    return self.commit(&entry);
                }
                match self.create_candidate(options) {
                    Some(name) => self.commit(&ComboEntry::Create(name)),
                    None => ComboAction::None,
                }
            }
            ComboKey::Escape => {
                self.close();
                ComboAction::None
            }
            ComboKey::Backspace if self.input.is_empty() => ComboAction::RemoveLast,
            ComboKey::Backspace | ComboKey::Other => ComboAction::None,
        }
    }
}

/// Tag combobox
///
/// Props:
/// - options: all known tags (sorted)
/// - selected: ids currently assigned
/// - on_select / on_remove: existing tag picked / chip removed
/// - on_create: a new tag name was committed
#[component]
pub fn TagSelector(
    #[prop(into)] options: Signal<Vec<Tag>>,
    #[prop(into)] selected: Signal<Vec<u32>>,
    #[prop(into)] on_select: Callback<u32>,
    #[prop(into)] on_remove: Callback<u32>,
    #[prop(into)] on_create: Callback<String>,
    #[prop(into)] creating: Signal<bool>,
    #[prop(optional)] input_id: Option<&'static str>,
) -> impl IntoView {
    let combo = RwSignal::new(TagCombo::default());
    let input_ref = NodeRef::<html::Input>::new();

    let refocus = move || {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    };

    let dispatch = move |action: ComboAction| match action {
        ComboAction::Select(id) => {
            on_select.run(id);
            refocus();
        }
        ComboAction::Create(name) => {
            on_create.run(name);
            refocus();
        }
        ComboAction::RemoveLast => {
            if let Some(last) = selected.get_untracked().last().copied() {
                on_remove.run(last);
            }
        }
        ComboAction::None => {}
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ComboKey::from_key(&ev.key());
        if matches!(key, ComboKey::Up | ComboKey::Down | ComboKey::Enter) {
            ev.prevent_default();
        }
        let opts = options.get_untracked();
        let sel = selected.get_untracked();
        let mut action = ComboAction::None;
        combo.update(|c| action = c.handle_key(key, &opts, &sel));
        dispatch(action);
    };

    let entries = move || combo.with(|c| c.entries(&options.get(), &selected.get()));

    let state_class = move || match combo.with(|c| c.state(&options.get())) {
        ComboState::Closed => "tag-selector",
        ComboState::OpenEmpty => "tag-selector open",
        ComboState::OpenFiltered => "tag-selector open filtered",
        ComboState::OpenWithCreate => "tag-selector open can-create",
    };

    view! {
        <div class=state_class>
            <div class="tag-chips">
                <For
                    each=move || selected.get()
                    key=|id| *id
                    children=move |id| {
                        let name = move || {
                            options.with(|opts| {
                                opts.iter().find(|t| t.id == id).map(|t| t.name.clone()).unwrap_or_else(|| format!("#{}", id))
                            })
                        };
                        view! {
                            <span class="tag-chip">
                                {name}
                                <button
                                    type="button"
                                    class="tag-chip-remove"
                                    title="Tag entfernen"
                                    on:click=move |_| on_remove.run(id)
                                >
                                    "×"
                                </button>
                            </span>
                        }
                    }
                />
                <input
                    type="text"
                    id=input_id
                    class="tag-selector-input"
                    placeholder="Tag suchen oder neu anlegen..."
                    autocomplete="off"
                    node_ref=input_ref
                    prop:value=move || combo.with(|c| c.input().to_string())
                    on:input=move |ev| combo.update(|c| c.set_input(event_target_value(&ev)))
                    on:focus=move |_| combo.update(|c| c.open())
                    on:keydown=on_keydown
                />
                <Show when=move || creating.get()>
                    <span class="inline-progress">"Wird angelegt..."</span>
                </Show>
            </div>

            {move || {
                if !combo.with(|c| c.is_open()) {
                    return view! { <div></div> }.into_any();
                }
                let list = entries();
                if list.is_empty() {
                    return view! { <div class="autocomplete-list empty">"Keine weiteren Tags"</div> }.into_any();
                }
                let highlighted = combo.with(|c| c.highlighted());
                view! {
                    <div class="autocomplete-list">
                        <button type="button" class="autocomplete-close" on:click=move |_| combo.update(|c| c.close())>
                            "Schließen"
                        </button>
                        {list.into_iter().enumerate().map(|(i, entry)| {
                            let is_highlighted = highlighted == Some(i);
                            let label = match &entry {
                                ComboEntry::Existing(tag) => tag.name.clone(),
                                ComboEntry::Create(name) => format!("„{}“ neu anlegen", name),
                            };
                            let class = match (&entry, is_highlighted) {
                                (ComboEntry::Create(_), true) => "autocomplete-item create selected",
                                (ComboEntry::Create(_), false) => "autocomplete-item create",
                                (_, true) => "autocomplete-item selected",
                                (_, false) => "autocomplete-item",
                            };
                            view! {
                                <button
                                    type="button"
                                    class=class
                                    on:mousedown=move |ev| ev.prevent_default()
                                    on:click=move |_| {
                                        let mut action = ComboAction::None;
                                        combo.update(|c| action = c.commit(&entry));
                                        dispatch(action);
                                    }
                                >
                                    {label}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> Vec<Tag> {
        ["Elektro", "Garten", "Werkzeug", "Werkstatt"]
            .iter()
            .enumerate()
            .map(|(i, name)| Tag {
                id: i as u32 + 1,
                name: name.to_string(),
                color: None,
            })
            .collect()
    }

    fn names(entries: &[ComboEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e {
                ComboEntry::Existing(t) => t.name.clone(),
                ComboEntry::Create(n) => format!("+{}", n),
            })
            .collect()
    }

    #[test]
    fn test_states() {
        let options = tags();
        let mut combo = TagCombo::default();
        assert_eq!(combo.state(&options), ComboState::Closed);
        combo.open();
        assert_eq!(combo.state(&options), ComboState::OpenEmpty);
        combo.set_input("werk".to_string());
        assert_eq!(combo.state(&options), ComboState::OpenWithCreate);
        combo.set_input("Garten".to_string());
        assert_eq!(combo.state(&options), ComboState::OpenFiltered);
    }

    #[test]
    fn test_filter_is_substring_over_unselected() {
        let options = tags();
        let mut combo = TagCombo::default();
        combo.set_input("WERK".to_string());
        assert_eq!(names(&combo.entries(&options, &[3])), vec!["Werkstatt", "+WERK"]);
    }

    #[test]
    fn test_exact_match_offers_no_create() {
        let options = tags();
        let mut combo = TagCombo::default();
        combo.set_input("  werkzeug ".to_string());
        let entries = combo.entries(&options, &[]);
        assert_eq!(names(&entries), vec!["Werkzeug"]);

        // Even when the matching tag is already selected
        assert!(combo.entries(&options, &[3]).is_empty());
        assert_eq!(combo.handle_key(ComboKey::Enter, &options, &[3]), ComboAction::None);
    }

    #[test]
    fn test_arrows_cycle_including_create_entry() {
        let options = tags();
        let mut combo = TagCombo::default();
        combo.set_input("werk".to_string());
        // Werkzeug, Werkstatt, create
        combo.handle_key(ComboKey::Down, &options, &[]);
        assert_eq!(combo.highlighted(), Some(0));
        combo.handle_key(ComboKey::Down, &options, &[]);
        combo.handle_key(ComboKey::Down, &options, &[]);
        assert_eq!(combo.highlighted(), Some(2));
        combo.handle_key(ComboKey::Down, &options, &[]);
        assert_eq!(combo.highlighted(), Some(0));
        combo.handle_key(ComboKey::Up, &options, &[]);
        assert_eq!(combo.highlighted(), Some(2));
    }

    #[test]
    fn test_enter_commits_highlighted_and_clears_input() {
        let options = tags();
        let mut combo = TagCombo::default();
        combo.set_input("gar".to_string());
        combo.handle_key(ComboKey::Down, &options, &[]);
        assert_eq!(combo.handle_key(ComboKey::Enter, &options, &[]), ComboAction::Select(2));
        assert_eq!(combo.input(), "");
        assert!(combo.is_open());
    }

    #[test]
    fn test_enter_on_create_entry() {
        let options = tags();
        let mut combo = TagCombo::default();
        combo.set_input("Keller".to_string());
        combo.handle_key(ComboKey::Up, &options, &[]);
        assert_eq!(
            combo.handle_key(ComboKey::Enter, &options, &[]),
            ComboAction::Create("Keller".to_string())
        );
    }

    #[test]
    fn test_enter_without_highlight_creates_unmatched() {
        let options = tags();
        let mut combo = TagCombo::default();
        combo.set_input(" Dachboden ".to_string());
        assert_eq!(
            combo.handle_key(ComboKey::Enter, &options, &[]),
            ComboAction::Create("Dachboden".to_string())
        );
        // Empty input does nothing
        assert_eq!(combo.handle_key(ComboKey::Enter, &options, &[]), ComboAction::None);
    }

    #[test]
    fn test_escape_closes_without_commit() {
        let options = tags();
        let mut combo = TagCombo::default();
        combo.set_input("Gar".to_string());
        combo.handle_key(ComboKey::Down, &options, &[]);
        assert_eq!(combo.handle_key(ComboKey::Escape, &options, &[]), ComboAction::None);
        assert!(!combo.is_open());
        assert_eq!(combo.highlighted(), None);
        assert_eq!(combo.input(), "Gar");
    }

    #[test]
    fn test_backspace_on_empty_input_removes_last() {
        let options = tags();
        let mut combo = TagCombo::default();
        assert_eq!(combo.handle_key(ComboKey::Backspace, &options, &[1, 2]), ComboAction::RemoveLast);
        combo.set_input("G".to_string());
        assert_eq!(combo.handle_key(ComboKey::Backspace, &options, &[1, 2]), ComboAction::None);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(ComboKey::from_key("ArrowDown"), ComboKey::Down);
        assert_eq!(ComboKey::from_key("a"), ComboKey::Other);
    }
}
