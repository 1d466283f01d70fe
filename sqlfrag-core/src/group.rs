//! Shared, mutable condition groups

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::condition::{ConditionEntry, Connector, IntoConditions};

/// Ordered conditions joined by AND / OR, rendered in parentheses when nested.
///
/// A `Group` is a handle: clones share the same sequence, and a group embedded
/// in another is stored by handle, so conditions appended later still show up
/// when the parent renders.
///
/// # Examples
/// ```
/// use sqlfrag_core::{ConditionEntry, Group};
///
/// let group = Group::new();
/// group.and(("id", 1)).or(("id", 2));
///
/// assert_eq!(
///     group.conditions(),
///     vec![
///         ConditionEntry::binary("id", 1),
///         ConditionEntry::OR,
///         ConditionEntry::binary("id", 2),
///     ]
/// );
/// ```
#[derive(Clone, Default)]
pub struct Group {
    entries: Arc<RwLock<Vec<(Connector, ConditionEntry)>>>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append conditions joined with AND
    pub fn and(&self, conditions: impl IntoConditions) -> &Self {
        self.push(Connector::And, conditions)
    }

    /// Append conditions joined with OR
    pub fn or(&self, conditions: impl IntoConditions) -> &Self {
        self.push(Connector::Or, conditions)
    }

    fn push(&self, connector: Connector, conditions: impl IntoConditions) -> &Self {
        let added = conditions.into_conditions();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.extend(added.into_iter().map(|entry| (connector, entry)));
        self
    }

    /// Snapshot of the conditions with connectors between them.
    ///
    /// The connector of the first condition is dropped.
    pub fn conditions(&self) -> Vec<ConditionEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut out = Vec::with_capacity(entries.len() * 2);
        for (i, (connector, entry)) in entries.iter().enumerate() {
            if i > 0 {
                out.push(ConditionEntry::Connector(*connector));
            }
            out.push(entry.clone());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when both handles point at the same sequence
    pub fn same_group(&self, other: &Group) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.same_group(other)
    }
}

// A group can contain itself, so only the size is printed
impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.entries.try_read().map(|entries| entries.len()).ok();
        f.debug_struct("Group").field("len", &len).finish()
    }
}
