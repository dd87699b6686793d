//! Greedy coloring by descending degree.
//!
//! Used as a fallback when backtracking finds nothing. Ignores per-variable
//! domains and draws from the whole palette, so it always terminates in one
//! pass but may leave variables uncolored.

use std::cmp::Reverse;

use crate::graph::ConstraintGraph;
use crate::{GreedyColoring, Value, Variable};

/// Variables by descending degree, ties by ascending identity.
pub fn degree_order<V: Variable>(graph: &ConstraintGraph<V>) -> Vec<V> {
    let mut order: Vec<V> = graph.variables().cloned().collect();
    // Stable sort over ascending input keeps ties in identity order.
    order.sort_by_key(|v| Reverse(graph.degree(v)));
    order
}

/// Give each variable, in [`degree_order`], the first palette color not held
/// by an already-colored neighbour. `None` when every color is taken.
pub fn greedy_color<V: Variable, C: Value>(
    graph: &ConstraintGraph<V>,
    palette: &[C],
) -> GreedyColoring<V, C> {
    let mut coloring = GreedyColoring::new();
    for variable in degree_order(graph) {
        let taken: Vec<&C> = graph
            .neighbors(&variable)
            .filter_map(|n| coloring.get(n).and_then(Option::as_ref))
            .collect();
        let color = palette.iter().find(|c| !taken.contains(c)).cloned();
        coloring.insert(variable, color);
    }
    coloring
}
