//! Grid diff engine.
//!
//! Compares an edited row set against the snapshot it was loaded from and
//! classifies every row as deleted, updated, inserted or unmatched. The
//! classification is pure; persistence happens elsewhere.

use crate::employee::{normalize_email, EmployeeRow};
use crate::ids::EmployeeId;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A row type that can be diffed against its original snapshot.
pub trait Diffable {
    /// Identity type of a persisted row.
    type Id: Clone + Eq + Hash;

    /// Identity of the row, `None` for rows added in the editor.
    fn identity(&self) -> Option<&Self::Id>;

    /// Whether a new row carries enough content to be worth inserting.
    fn has_content(&self) -> bool;

    /// Whether any tracked field differs from `original`.
    fn differs_from(&self, original: &Self) -> bool;
}

/// An edited row paired with the snapshot row it replaces.
#[derive(Debug, Clone, PartialEq)]
pub struct RowUpdate<T> {
    pub before: T,
    pub after: T,
}

/// Classification of an edited row set.
///
/// The four sets are disjoint: each original row lands in at most one of
/// `deletes`/`updates`, and each edited row in at most one of
/// `updates`/`inserts`/`unmatched`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiff<T> {
    /// Original rows whose identity no longer appears in the edited set.
    pub deletes: Vec<T>,
    /// Rows whose identity matched and whose tracked fields changed.
    pub updates: Vec<RowUpdate<T>>,
    /// New rows (no identity) with at least one identifying field set.
    pub inserts: Vec<T>,
    /// Edited rows carrying an identity the snapshot does not know, or a
    /// repeat of an identity already matched by an earlier row.
    pub unmatched: Vec<T>,
}

impl<T> Default for RowDiff<T> {
    fn default() -> Self {
        Self {
            deletes: Vec::new(),
            updates: Vec::new(),
            inserts: Vec::new(),
            unmatched: Vec::new(),
        }
    }
}

impl<T: Diffable> RowDiff<T> {
    /// Identities of the deleted rows, in snapshot order.
    pub fn delete_ids(&self) -> Vec<&T::Id> {
        self.deletes.iter().filter_map(|r| r.identity()).collect()
    }

    /// Identities of the updated rows, in edited order.
    pub fn update_ids(&self) -> Vec<&T::Id> {
        self.updates
            .iter()
            .filter_map(|u| u.after.identity())
            .collect()
    }

    /// True when nothing needs to be written.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.updates.is_empty() && self.inserts.is_empty()
    }
}

/// Diff `edited` against `original`.
pub fn diff_rows<T>(original: &[T], edited: &[T]) -> RowDiff<T>
where
    T: Diffable + Clone,
{
    let mut original_by_id: HashMap<&T::Id, &T> = HashMap::new();
    for row in original {
        if let Some(id) = row.identity() {
            original_by_id.entry(id).or_insert(row);
        }
    }

    let edited_ids: HashSet<&T::Id> = edited.iter().filter_map(|r| r.identity()).collect();

    let mut diff = RowDiff::default();
    let mut seen_deletes: HashSet<&T::Id> = HashSet::new();
    for row in original {
        if let Some(id) = row.identity() {
            if !edited_ids.contains(id) && seen_deletes.insert(id) {
                diff.deletes.push(row.clone());
            }
        }
    }

    let mut matched: HashSet<&T::Id> = HashSet::new();
    for row in edited {
        match row.identity() {
            Some(id) => match original_by_id.get(id).copied() {
                Some(before) if !matched.contains(id) => {
                    matched.insert(id);
                    if row.differs_from(before) {
                        diff.updates.push(RowUpdate {
                            before: before.clone(),
                            after: row.clone(),
                        });
                    }
                }
                _ => diff.unmatched.push(row.clone()),
            },
            None => {
                if row.has_content() {
                    diff.inserts.push(row.clone());
                }
            }
        }
    }

    diff
}

impl Diffable for EmployeeRow {
    type Id = EmployeeId;

    fn identity(&self) -> Option<&EmployeeId> {
        self.employee_id.as_ref()
    }

    fn has_content(&self) -> bool {
        !self.first_name.trim().is_empty()
            || !self.last_name.trim().is_empty()
            || !self.email.trim().is_empty()
    }

    fn differs_from(&self, original: &Self) -> bool {
        let text_changed = self
            .tracked_text_fields()
            .iter()
            .zip(original.tracked_text_fields().iter())
            .any(|((column, after), (_, before))| match *column {
                "EMAIL" | "MANAGER_EMAIL" => normalize_email(after) != normalize_email(before),
                _ => after.trim() != before.trim(),
            });

        let date_changed = match (self.hire_date(), original.hire_date()) {
            (Some(after), Some(before)) => after != before,
            (None, None) => self.hire_date.trim() != original.hire_date.trim(),
            _ => true,
        };

        text_changed || date_changed || self.active != original.active
    }
}

#[cfg(test)]
#[path = "diff_test.rs"]
mod tests;
