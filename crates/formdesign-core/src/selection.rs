//! Selection of elements by id.

use crate::document::Document;
use crate::elements::ElementId;

/// How a click combines with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Select exactly this element.
    Replace,
    /// Add if absent, remove if present (modifier-click).
    Toggle,
    /// Add without removing anything.
    Add,
}

/// Ordered set of selected element ids.
///
/// Order is the order of selection, which the property panel uses to pick
/// the primary element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = ElementId>) -> Self {
        let mut selection = Self::new();
        for id in ids {
            selection.add(id);
        }
        selection
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    /// First selected element.
    pub fn primary(&self) -> Option<&ElementId> {
        self.ids.first()
    }

    /// The single selected element, if exactly one is selected.
    pub fn single(&self) -> Option<&ElementId> {
        match self.ids.as_slice() {
            [id] => Some(id),
            _ => None,
        }
    }

    fn add(&mut self, id: ElementId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn select(&mut self, id: ElementId, mode: SelectMode) {
        match mode {
            SelectMode::Replace => {
                self.ids.clear();
                self.ids.push(id);
            }
            SelectMode::Toggle => {
                if let Some(pos) = self.ids.iter().position(|s| *s == id) {
                    self.ids.remove(pos);
                } else {
                    self.ids.push(id);
                }
            }
            SelectMode::Add => self.add(id),
        }
    }

    /// Replace the selection with the given ids.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        *self = Self::from_ids(ids);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer exist in the document.
    /// Returns true if anything was removed.
    pub fn prune(&mut self, document: &Document) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| document.contains(id));
        before != self.ids.len()
    }

    pub fn to_vec(&self) -> Vec<ElementId> {
        self.ids.clone()
    }
}
