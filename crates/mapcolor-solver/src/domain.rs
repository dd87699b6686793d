//! Domain store with an undo journal.
//!
//! Every removal is appended to a journal as `(variable, color, position)`.
//! A [`Mark`] records the journal length; rewinding to a mark replays the
//! removals made since then in reverse, putting each color back at the
//! position it was taken from. Rewinding therefore restores domains exactly,
//! order included, without copying them.

use std::collections::BTreeMap;

use crate::{Value, Variable};

/// A position in the undo journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(usize);

#[derive(Debug, Clone)]
struct Removal<V, C> {
    variable: V,
    color: C,
    position: usize,
}

/// Mutable per-variable domains for one solve.
#[derive(Debug, Clone)]
pub struct DomainStore<V, C> {
    domains: BTreeMap<V, Vec<C>>,
    journal: Vec<Removal<V, C>>,
}

impl<V: Variable, C: Value> DomainStore<V, C> {
    pub fn new(domains: BTreeMap<V, Vec<C>>) -> Self {
        Self {
            domains,
            journal: Vec::new(),
        }
    }

    /// Current domain of `variable`, empty for unknown variables.
    pub fn domain(&self, variable: &V) -> &[C] {
        self.domains
            .get(variable)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn size(&self, variable: &V) -> usize {
        self.domain(variable).len()
    }

    pub fn contains(&self, variable: &V, color: &C) -> bool {
        self.domain(variable).contains(color)
    }

    /// Remove `color` from `variable`'s domain. Returns false if it was absent.
    pub fn remove(&mut self, variable: &V, color: &C) -> bool {
        let Some(domain) = self.domains.get_mut(variable) else {
            return false;
        };
        let Some(position) = domain.iter().position(|c| c == color) else {
            return false;
        };
        let color = domain.remove(position);
        self.journal.push(Removal {
            variable: variable.clone(),
            color,
            position,
        });
        true
    }

    /// Reduce `variable`'s domain to `keep` alone. Returns the number of colors removed.
    pub fn narrow(&mut self, variable: &V, keep: &C) -> usize {
        let others: Vec<C> = self
            .domain(variable)
            .iter()
            .filter(|c| *c != keep)
            .cloned()
            .collect();
        let mut removed = 0;
        for color in &others {
            if self.remove(variable, color) {
                removed += 1;
            }
        }
        removed
    }

    /// Current journal position.
    pub fn mark(&self) -> Mark {
        Mark(self.journal.len())
    }

    /// Undo every removal made after `mark`, most recent first.
    ///
    /// Re-adding a color that is already present is a no-op.
    pub fn rewind(&mut self, mark: Mark) {
        while self.journal.len() > mark.0 {
            let Some(removal) = self.journal.pop() else {
                break;
            };
            let domain = self.domains.entry(removal.variable).or_default();
            if !domain.contains(&removal.color) {
                let position = removal.position.min(domain.len());
                domain.insert(position, removal.color);
            }
        }
    }

    /// Number of removals not yet undone.
    pub fn journal_len(&self) -> usize {
        self.journal.len()
    }

    /// Copy of every domain, for equality checks.
    pub fn snapshot(&self) -> BTreeMap<V, Vec<C>> {
        self.domains.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DomainStore<u32, char> {
        DomainStore::new(BTreeMap::from([
            (1, vec!['r', 'g', 'b']),
            (2, vec!['r', 'g']),
        ]))
    }

    #[test]
    fn test_remove_and_rewind_restores_order() {
        let mut store = store();
        let before = store.snapshot();
        let mark = store.mark();

        assert!(store.remove(&1, &'g'));
        assert!(store.remove(&1, &'r'));
        assert!(!store.remove(&1, &'g'));
        assert_eq!(store.domain(&1), &['b']);
        assert_eq!(store.journal_len(), 2);

        store.rewind(mark);
        assert_eq!(store.snapshot(), before);
        assert_eq!(store.journal_len(), 0);
    }

    #[test]
    fn test_nested_marks() {
        let mut store = store();
        let outer = store.mark();
        store.remove(&2, &'r');
        let inner = store.mark();
        store.remove(&1, &'b');
        store.remove(&2, &'g');
        assert_eq!(store.size(&2), 0);

        store.rewind(inner);
        assert_eq!(store.domain(&2), &['g']);
        assert_eq!(store.domain(&1), &['r', 'g', 'b']);

        store.rewind(outer);
        assert_eq!(store.domain(&2), &['r', 'g']);
    }

    #[test]
    fn test_narrow_keeps_single_color() {
        let mut store = store();
        let mark = store.mark();
        assert_eq!(store.narrow(&1, &'g'), 2);
        assert_eq!(store.domain(&1), &['g']);
        store.rewind(mark);
        assert_eq!(store.domain(&1), &['r', 'g', 'b']);
    }

    #[test]
    fn test_rewind_is_idempotent_for_present_colors() {
        let mut store = store();
        let mark = store.mark();
        store.remove(&2, &'g');
        // Put it back by hand before the journal gets to it.
        store.domains.get_mut(&2).unwrap().push('g');
        store.rewind(mark);
        assert_eq!(store.domain(&2), &['r', 'g']);
    }

    #[test]
    fn test_unknown_variable() {
        let mut store = store();
        assert!(store.domain(&9).is_empty());
        assert!(!store.remove(&9, &'r'));
        assert_eq!(store.journal_len(), 0);
    }
}
