//! Variable ordering.
//!
//! Selection is a pure function of the current assignment and domains, so the
//! configuration can change between solves without any state to reset.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::domain::DomainStore;
use crate::graph::ConstraintGraph;
use crate::{Assignment, Value, Variable};

/// Which ordering heuristics are active. All four combinations are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Minimum remaining values: prefer the smallest current domain.
    #[serde(default = "enabled")]
    pub use_mrv: bool,
    /// Prefer the variable with the most unassigned neighbours.
    #[serde(default = "enabled")]
    pub use_degree: bool,
}

fn enabled() -> bool {
    true
}

impl HeuristicConfig {
    pub const fn new(use_mrv: bool, use_degree: bool) -> Self {
        Self {
            use_mrv,
            use_degree,
        }
    }

    /// All four combinations, both-on first.
    pub const fn all() -> [Self; 4] {
        [
            Self::new(true, true),
            Self::new(true, false),
            Self::new(false, true),
            Self::new(false, false),
        ]
    }

    pub fn label(&self) -> &'static str {
        match (self.use_mrv, self.use_degree) {
            (true, true) => "MRV + Degree",
            (true, false) => "MRV",
            (false, true) => "Degree",
            (false, false) => "No Heuristic",
        }
    }
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Number of neighbours of `variable` that are not yet assigned.
pub fn unassigned_degree<V: Variable, C>(
    graph: &ConstraintGraph<V>,
    assignment: &Assignment<V, C>,
    variable: &V,
) -> usize {
    graph
        .neighbors(variable)
        .filter(|n| !assignment.contains_key(*n))
        .count()
}

/// Pick the next unassigned variable, or `None` when all are assigned.
///
/// - MRV + Degree: smallest domain, then most unassigned neighbours.
/// - MRV: smallest domain.
/// - Degree: most unassigned neighbours.
/// - Neither: first unassigned.
///
/// Remaining ties go to the smallest variable: candidates are visited in
/// ascending order and `min_by_key` keeps the first minimum.
pub fn select_variable<V: Variable, C: Value>(
    graph: &ConstraintGraph<V>,
    domains: &DomainStore<V, C>,
    assignment: &Assignment<V, C>,
    config: HeuristicConfig,
) -> Option<V> {
    let mut unassigned = graph
        .variables()
        .filter(|v| !assignment.contains_key(*v));

    let chosen = match (config.use_mrv, config.use_degree) {
        (true, true) => unassigned.min_by_key(|v| {
            (
                domains.size(v),
                Reverse(unassigned_degree(graph, assignment, v)),
            )
        }),
        (true, false) => unassigned.min_by_key(|v| domains.size(v)),
        (false, true) => {
            unassigned.min_by_key(|v| Reverse(unassigned_degree(graph, assignment, v)))
        }
        (false, false) => unassigned.next(),
    };
    chosen.cloned()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    // 1 - 2 - 3, plus 3 - 4 and 3 - 5. Region 2 has a restricted domain.
    fn fixture() -> (ConstraintGraph<u32>, DomainStore<u32, char>) {
        let graph =
            ConstraintGraph::from_edges(&[1, 2, 3, 4, 5], &[(1, 2), (2, 3), (3, 4), (3, 5)])
                .unwrap();
        let mut domains = BTreeMap::new();
        for v in 1..=5 {
            domains.insert(v, vec!['r', 'g', 'b']);
        }
        domains.insert(2, vec!['r', 'g']);
        (graph, DomainStore::new(domains))
    }

    #[test]
    fn test_mrv_and_degree() {
        let (graph, domains) = fixture();
        let mut assignment = Assignment::new();
        let pick = |a: &Assignment<u32, char>, c| select_variable(&graph, &domains, a, c);

        let both = HeuristicConfig::new(true, true);
        assert_eq!(pick(&assignment, both), Some(2));
        assert_eq!(pick(&assignment, HeuristicConfig::new(true, false)), Some(2));
        assert_eq!(pick(&assignment, HeuristicConfig::new(false, true)), Some(3));
        assert_eq!(pick(&assignment, HeuristicConfig::new(false, false)), Some(1));

        assignment.insert(2, 'r');
        // Domains tie at 3; 3 still has two unassigned neighbours.
        assert_eq!(pick(&assignment, both), Some(3));
        assert_eq!(pick(&assignment, HeuristicConfig::new(true, false)), Some(1));
    }

    #[test]
    fn test_degree_counts_only_unassigned_neighbours() {
        let (graph, domains) = fixture();
        let mut assignment = Assignment::new();
        assignment.insert(4, 'r');
        assignment.insert(5, 'g');
        assert_eq!(unassigned_degree(&graph, &assignment, &3), 1);
        // 2 keeps two unassigned neighbours (1 and 3), 3 is down to one.
        assert_eq!(
            select_variable(&graph, &domains, &assignment, HeuristicConfig::new(false, true)),
            Some(2)
        );
    }

    #[test]
    fn test_none_when_all_assigned() {
        let (graph, domains) = fixture();
        let assignment: Assignment<u32, char> = (1..=5).map(|v| (v, 'r')).collect();
        for config in HeuristicConfig::all() {
            assert_eq!(select_variable(&graph, &domains, &assignment, config), None);
        }
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = HeuristicConfig::all().iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["MRV + Degree", "MRV", "Degree", "No Heuristic"]);
    }
}
