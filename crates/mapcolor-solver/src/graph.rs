use std::collections::{BTreeMap, BTreeSet};

use crate::problem::SolveError;
use crate::Variable;

/// Variable -> neighbouring variables, as supplied by the host.
pub type Adjacency<V> = BTreeMap<V, BTreeSet<V>>;

/// Build an adjacency map from undirected edges.
pub fn adjacency_from_edges<V: Variable>(edges: &[(V, V)]) -> Adjacency<V> {
    let mut adjacency = Adjacency::new();
    for (a, b) in edges {
        adjacency
            .entry(a.clone())
            .or_insert_with(BTreeSet::new)
            .insert(b.clone());
        adjacency
            .entry(b.clone())
            .or_insert_with(BTreeSet::new)
            .insert(a.clone());
    }
    adjacency
}

/// Symmetric, immutable adjacency between variables.
///
/// Every variable has an entry, isolated ones with an empty neighbour set.
/// Iteration is in ascending variable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintGraph<V> {
    neighbors: BTreeMap<V, BTreeSet<V>>,
}

impl<V: Variable> ConstraintGraph<V> {
    /// Validate and symmetrise the host topology: an entry `a -> b` also
    /// adds `b -> a`.
    pub fn build(variables: &[V], adjacency: &Adjacency<V>) -> Result<Self, SolveError> {
        let mut neighbors: BTreeMap<V, BTreeSet<V>> = BTreeMap::new();
        for variable in variables {
            if neighbors.insert(variable.clone(), BTreeSet::new()).is_some() {
                return Err(SolveError::DuplicateVariable(format!("{variable:?}")));
            }
        }

        for (variable, adjacent) in adjacency {
            if !neighbors.contains_key(variable) {
                return Err(SolveError::UnknownVariable(format!("{variable:?}")));
            }
            for other in adjacent {
                if other == variable {
                    return Err(SolveError::SelfLoop(format!("{variable:?}")));
                }
                if !neighbors.contains_key(other) {
                    return Err(SolveError::UnknownVariable(format!("{other:?}")));
                }
            }
        }

        for (variable, adjacent) in adjacency {
            for other in adjacent {
                if let Some(set) = neighbors.get_mut(variable) {
                    set.insert(other.clone());
                }
                if let Some(set) = neighbors.get_mut(other) {
                    set.insert(variable.clone());
                }
            }
        }

        Ok(Self { neighbors })
    }

    /// Edges whose endpoints are already known to be distinct members of
    /// `variables`.
    pub(crate) fn from_trusted_edges(variables: &[V], edges: &[(V, V)]) -> Self {
        let mut neighbors: BTreeMap<V, BTreeSet<V>> = variables
            .iter()
            .map(|v| (v.clone(), BTreeSet::new()))
            .collect();
        for (a, b) in edges {
            neighbors.entry(a.clone()).or_default().insert(b.clone());
            neighbors.entry(b.clone()).or_default().insert(a.clone());
        }
        Self { neighbors }
    }

    /// Convenience constructor from an undirected edge list.
    pub fn from_edges(variables: &[V], edges: &[(V, V)]) -> Result<Self, SolveError> {
        Self::build(variables, &adjacency_from_edges(edges))
    }

    pub fn variables(&self) -> impl Iterator<Item = &V> {
        self.neighbors.keys()
    }

    pub fn contains(&self, variable: &V) -> bool {
        self.neighbors.contains_key(variable)
    }

    pub fn neighbors(&self, variable: &V) -> impl Iterator<Item = &V> {
        self.neighbors.get(variable).into_iter().flatten()
    }

    pub fn are_adjacent(&self, a: &V, b: &V) -> bool {
        self.neighbors.get(a).is_some_and(|set| set.contains(b))
    }

    /// Static degree: number of neighbours regardless of assignment.
    pub fn degree(&self, variable: &V) -> usize {
        self.neighbors.get(variable).map_or(0, BTreeSet::len)
    }

    /// Every edge once, as `(low, high)`.
    pub fn edges(&self) -> Vec<(V, V)> {
        self.neighbors
            .iter()
            .flat_map(|(a, set)| {
                set.iter()
                    .filter(move |b| *b > a)
                    .map(move |b| (a.clone(), b.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
