//! Row Selection
//!
//! Selected item ids of the item table. Survives paging; the header checkbox
//! acts on the rows of the current page only.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: BTreeSet<u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn toggle(&mut self, id: u32) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Every id of the page is selected (false for an empty page)
    pub fn all_selected(&self, page_ids: &[u32]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.ids.contains(id))
    }

    /// Select the whole page, or clear it when it is already fully selected
    pub fn toggle_page(&mut self, page_ids: &[u32]) {
        if self.all_selected(page_ids) {
            for id in page_ids {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(page_ids.iter().copied());
        }
    }

    pub fn remove_all(&mut self, ids: &[u32]) {
        for id in ids {
            self.ids.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> Vec<u32> {
        self.ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_row() {
        let mut selection = Selection::new();
        selection.toggle(4);
        assert!(selection.contains(4));
        selection.toggle(4);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_header_toggles_current_page() {
        let mut selection = Selection::new();
        selection.toggle(99); // from another page
        let page = [1, 2, 3];

        selection.toggle(2);
        assert!(!selection.all_selected(&page));
        selection.toggle_page(&page);
        assert!(selection.all_selected(&page));
        assert_eq!(selection.len(), 4);

        selection.toggle_page(&page);
        assert_eq!(selection.ids(), vec![99]);
    }

    #[test]
    fn test_empty_page_is_never_all_selected() {
        let selection = Selection::new();
        assert!(!selection.all_selected(&[]));
    }

    #[test]
    fn test_remove_all() {
        let mut selection = Selection::new();
        selection.toggle_page(&[1, 2, 3]);
        selection.remove_all(&[1, 3]);
        assert_eq!(selection.ids(), vec![2]);
    }
}
