//! Multi-select set for batch operations on issue records.
//!
//! Only issues participate in batch actions (merge, rectification-notice
//! generation); toggling any other kind is rejected. The set holds display
//! keys, so it must be pruned whenever the visible list changes.

use std::collections::BTreeSet;

use crate::key::DisplayKey;
use crate::reconcile::ReconciledRecord;
use crate::record::RecordKind;

/// The set of currently selected issue records.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    keys: BTreeSet<DisplayKey>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a key in or out of the selection.
    ///
    /// Returns `false` without changing the set when the key does not
    /// belong to an issue record.
    pub fn toggle(&mut self, key: &DisplayKey) -> bool {
        if key.kind() != RecordKind::Issue {
            return false;
        }
        if !self.keys.remove(key) {
            self.keys.insert(key.clone());
        }
        true
    }

    pub fn contains(&self, key: &DisplayKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Drop every selected key that is no longer in the visible list.
    ///
    /// Called after each filter change or reload so the selection never
    /// references records the user cannot see.
    pub fn prune(&mut self, visible: &[ReconciledRecord]) {
        self.keys.retain(|key| visible.iter().any(|r| &r.key == key));
    }

    /// Selected keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &DisplayKey> {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::reconcile;
    use crate::record::{EventRecord, IssueRecord, SupervisionRecord};

    fn sample() -> Vec<ReconciledRecord> {
        reconcile(vec![
            vec![
                EventRecord::from_issue(IssueRecord {
                    id: Some(1),
                    ..Default::default()
                }),
                EventRecord::from_issue(IssueRecord {
                    id: Some(2),
                    ..Default::default()
                }),
            ],
            vec![EventRecord::from_supervision(SupervisionRecord {
                id: Some(3),
                ..Default::default()
            })],
        ])
    }

    #[test]
    fn toggle_adds_and_removes_issue_keys() {
        let records = sample();
        let mut selection = SelectionSet::new();

        assert!(selection.toggle(&records[0].key));
        assert!(selection.contains(&records[0].key));
        assert_eq!(selection.len(), 1);

        assert!(selection.toggle(&records[0].key));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_rejects_non_issue_kinds() {
        let records = sample();
        let supervision = &records[2];
        let mut selection = SelectionSet::new();

        assert!(!selection.toggle(&supervision.key));
        assert!(selection.is_empty());
    }

    #[test]
    fn prune_drops_keys_missing_from_visible_list() {
        let records = sample();
        let mut selection = SelectionSet::new();
        selection.toggle(&records[0].key);
        selection.toggle(&records[1].key);

        // Only issue 2 survives the next render.
        let visible = vec![records[1].clone()];
        selection.prune(&visible);

        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&records[1].key));
        assert!(!selection.contains(&records[0].key));
    }
}
