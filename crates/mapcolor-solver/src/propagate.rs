//! Forward checking.

use log::trace;

use crate::domain::DomainStore;
use crate::graph::ConstraintGraph;
use crate::{Assignment, Value, Variable};

/// Forward checking emptied a neighbour's domain.
///
/// `pruned` lists the removals applied before the wipeout was detected;
/// they are still in the store's journal and are undone by rewinding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wipeout<V, C> {
    pub variable: V,
    pub pruned: Vec<(V, C)>,
}

/// Remove `color` from the domain of every unassigned neighbour of `variable`.
///
/// Returns the `(neighbour, color)` removals in application order, or a
/// [`Wipeout`] as soon as a neighbour's domain becomes empty.
pub fn forward_check<V: Variable, C: Value>(
    graph: &ConstraintGraph<V>,
    domains: &mut DomainStore<V, C>,
    assignment: &Assignment<V, C>,
    variable: &V,
    color: &C,
) -> Result<Vec<(V, C)>, Wipeout<V, C>> {
    let mut pruned = Vec::new();
    for neighbor in graph.neighbors(variable) {
        if assignment.contains_key(neighbor) || !domains.remove(neighbor, color) {
            continue;
        }
        pruned.push((neighbor.clone(), color.clone()));
        if domains.size(neighbor) == 0 {
            trace!("wipeout of {neighbor:?} after {variable:?} = {color:?}");
            return Err(Wipeout {
                variable: neighbor.clone(),
                pruned,
            });
        }
    }
    Ok(pruned)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_prunes_unassigned_neighbours_only() {
        let graph = ConstraintGraph::from_edges(&[1, 2, 3, 4], &[(1, 2), (1, 3), (3, 4)]).unwrap();
        let mut domains = DomainStore::new(BTreeMap::from([
            (1, vec!['r', 'g']),
            (2, vec!['r', 'g']),
            (3, vec!['r', 'g']),
            (4, vec!['r', 'g']),
        ]));
        let mut assignment = Assignment::new();
        assignment.insert(3, 'g');
        assignment.insert(1, 'r');

        let pruned = forward_check(&graph, &mut domains, &assignment, &1, &'r').unwrap();
        assert_eq!(pruned, vec![(2, 'r')]);
        assert_eq!(domains.domain(&2), &['g']);
        assert_eq!(domains.domain(&3), &['r', 'g']);
        assert_eq!(domains.domain(&4), &['r', 'g']);
    }

    #[test]
    fn test_wipeout_returns_partial_pruning() {
        let graph = ConstraintGraph::from_edges(&[1, 2, 3, 4], &[(1, 2), (1, 3), (1, 4)]).unwrap();
        let mut domains = DomainStore::new(BTreeMap::from([
            (1, vec!['r']),
            (2, vec!['r', 'g']),
            (3, vec!['r']),
            (4, vec!['r', 'g']),
        ]));
        let before = domains.snapshot();
        let mark = domains.mark();
        let mut assignment = Assignment::new();
        assignment.insert(1, 'r');

        let wipeout = forward_check(&graph, &mut domains, &assignment, &1, &'r').unwrap_err();
        assert_eq!(wipeout.variable, 3);
        assert_eq!(wipeout.pruned, vec![(2, 'r'), (3, 'r')]);
        // Propagation stopped at 3; 4 was never touched.
        assert_eq!(domains.domain(&4), &['r', 'g']);

        domains.rewind(mark);
        assert_eq!(domains.snapshot(), before);
    }

    #[test]
    fn test_absent_color_is_not_reported() {
        let graph = ConstraintGraph::from_edges(&[1, 2], &[(1, 2)]).unwrap();
        let mut domains = DomainStore::new(BTreeMap::from([(1, vec!['r']), (2, vec!['g'])]));
        let mut assignment = Assignment::new();
        assignment.insert(1, 'r');
        let pruned = forward_check(&graph, &mut domains, &assignment, &1, &'r').unwrap();
        assert!(pruned.is_empty());
    }
}
