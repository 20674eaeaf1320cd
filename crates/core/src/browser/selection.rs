//! Multi-row selection keyed by row id, independent of paging.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// "Select all" over the visible page only.
    ///
    /// When every id on the page is already selected they are all
    /// deselected; otherwise the missing ones are added. Selections on other
    /// pages are left untouched.
    pub fn toggle_page<S: AsRef<str>>(&mut self, page_ids: &[S]) {
        let all_selected = !page_ids.is_empty() && page_ids.iter().all(|id| self.is_selected(id.as_ref()));
        for id in page_ids {
            if all_selected {
                self.ids.remove(id.as_ref());
            } else {
                self.ids.insert(id.as_ref().to_string());
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
    }
}
