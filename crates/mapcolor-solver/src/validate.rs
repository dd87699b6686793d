//! Post-hoc checks on finished colorings.

use crate::graph::ConstraintGraph;
use crate::problem::Problem;
use crate::{Assignment, GreedyColoring, Value, Variable};

/// Two adjacent variables holding the same color. `a < b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict<V, C> {
    pub a: V,
    pub b: V,
    pub color: C,
}

/// Every edge whose endpoints share a color, in edge order.
pub fn assignment_conflicts<V: Variable, C: Value>(
    graph: &ConstraintGraph<V>,
    assignment: &Assignment<V, C>,
) -> Vec<Conflict<V, C>> {
    graph
        .edges()
        .into_iter()
        .filter_map(|(a, b)| match (assignment.get(&a), assignment.get(&b)) {
            (Some(x), Some(y)) if x == y => Some(Conflict {
                color: x.clone(),
                a,
                b,
            }),
            _ => None,
        })
        .collect()
}

/// Same as [`assignment_conflicts`], skipping uncolored variables.
pub fn coloring_conflicts<V: Variable, C: Value>(
    graph: &ConstraintGraph<V>,
    coloring: &GreedyColoring<V, C>,
) -> Vec<Conflict<V, C>> {
    let assigned: Assignment<V, C> = coloring
        .iter()
        .filter_map(|(v, c)| c.clone().map(|c| (v.clone(), c)))
        .collect();
    assignment_conflicts(graph, &assigned)
}

/// Variables whose color lies outside their initial domain.
pub fn domain_violations<V: Variable, C: Value>(
    problem: &Problem<V, C>,
    assignment: &Assignment<V, C>,
) -> Vec<V> {
    assignment
        .iter()
        .filter(|(v, c)| !problem.initial_domain(v).contains(c))
        .map(|(v, _)| v.clone())
        .collect()
}

/// Complete, conflict-free and within every initial domain.
pub fn is_solution<V: Variable, C: Value>(
    problem: &Problem<V, C>,
    assignment: &Assignment<V, C>,
) -> bool {
    assignment.len() == problem.len()
        && problem.graph().variables().all(|v| assignment.contains_key(v))
        && assignment_conflicts(problem.graph(), assignment).is_empty()
        && domain_violations(problem, assignment).is_empty()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::graph::adjacency_from_edges;

    fn path() -> Problem<u32, char> {
        let adjacency = adjacency_from_edges(&[(1, 2), (2, 3)]);
        let domains = BTreeMap::from([(1, vec!['r']), (2, vec!['r', 'g']), (3, vec!['r', 'g'])]);
        Problem::new(&[1, 2, 3], &adjacency, &domains).unwrap()
    }

    #[test]
    fn test_conflicts_reported_per_edge() {
        let problem = path();
        let assignment = BTreeMap::from([(1, 'r'), (2, 'r'), (3, 'r')]);
        let conflicts = assignment_conflicts(problem.graph(), &assignment);
        assert_eq!(
            conflicts,
            vec![
                Conflict {
                    a: 1,
                    b: 2,
                    color: 'r',
                },
                Conflict {
                    a: 2,
                    b: 3,
                    color: 'r',
                },
            ]
        );
        assert!(!is_solution(&problem, &assignment));
    }

    #[test]
    fn test_gaps_are_not_conflicts() {
        let problem = path();
        let coloring = BTreeMap::from([(1, Some('r')), (2, None), (3, Some('r'))]);
        assert!(coloring_conflicts(problem.graph(), &coloring).is_empty());
    }

    #[test]
    fn test_domain_violation() {
        let problem = path();
        let assignment = BTreeMap::from([(1, 'g'), (2, 'r'), (3, 'g')]);
        assert_eq!(domain_violations(&problem, &assignment), vec![1]);
        assert!(!is_solution(&problem, &assignment));

        let good = BTreeMap::from([(1, 'r'), (2, 'g'), (3, 'r')]);
        assert!(is_solution(&problem, &good));
    }
}
