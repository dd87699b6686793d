use crate::graph::ConstraintGraph;
use crate::{Assignment, Value, Variable};

/// Whether `color` differs from the committed color of every assigned
/// neighbour of `variable`.
pub fn is_consistent<V: Variable, C: Value>(
    graph: &ConstraintGraph<V>,
    assignment: &Assignment<V, C>,
    variable: &V,
    color: &C,
) -> bool {
    graph
        .neighbors(variable)
        .all(|n| assignment.get(n) != Some(color))
}
