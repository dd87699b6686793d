use std::collections::BTreeMap;

use crate::graph::{Adjacency, ConstraintGraph};
use crate::{Value, Variable};

/// Input rejected before search begins.
///
/// Variable identities are rendered with `Debug` so the error stays
/// independent of the variable type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("adjacency references unknown variable {0}")]
    UnknownVariable(String),

    #[error("variable {0} is listed more than once")]
    DuplicateVariable(String),

    #[error("variable {0} is adjacent to itself")]
    SelfLoop(String),

    #[error("variable {0} has no domain")]
    MissingDomain(String),

    #[error("variable {0} has an empty domain")]
    EmptyDomain(String),

    #[error("palette is empty")]
    EmptyPalette,
}

/// A validated coloring problem: constraint graph plus initial domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem<V, C> {
    graph: ConstraintGraph<V>,
    domains: BTreeMap<V, Vec<C>>,
}

impl<V: Variable, C: Value> Problem<V, C> {
    /// Build a problem. Every variable needs a non-empty domain; repeated
    /// colors within a domain are dropped, keeping the first occurrence.
    pub fn new(
        variables: &[V],
        adjacency: &Adjacency<V>,
        initial_domains: &BTreeMap<V, Vec<C>>,
    ) -> Result<Self, SolveError> {
        let graph = ConstraintGraph::build(variables, adjacency)?;
        Self::from_graph(graph, initial_domains)
    }

    /// Build a problem where every variable starts with the full palette.
    pub fn with_palette(
        variables: &[V],
        adjacency: &Adjacency<V>,
        palette: &[C],
    ) -> Result<Self, SolveError> {
        if palette.is_empty() {
            return Err(SolveError::EmptyPalette);
        }
        let domains = variables
            .iter()
            .map(|v| (v.clone(), palette.to_vec()))
            .collect();
        Self::new(variables, adjacency, &domains)
    }

    pub fn from_graph(
        graph: ConstraintGraph<V>,
        initial_domains: &BTreeMap<V, Vec<C>>,
    ) -> Result<Self, SolveError> {
        if let Some(unknown) = initial_domains.keys().find(|v| !graph.contains(v)) {
            return Err(SolveError::UnknownVariable(format!("{unknown:?}")));
        }

        let mut domains = BTreeMap::new();
        for variable in graph.variables() {
            let given = initial_domains
                .get(variable)
                .ok_or_else(|| SolveError::MissingDomain(format!("{variable:?}")))?;
            if given.is_empty() {
                return Err(SolveError::EmptyDomain(format!("{variable:?}")));
            }
            let mut domain: Vec<C> = Vec::with_capacity(given.len());
            for color in given {
                if !domain.contains(color) {
                    domain.push(color.clone());
                }
            }
            domains.insert(variable.clone(), domain);
        }

        Ok(Self { graph, domains })
    }

    pub fn graph(&self) -> &ConstraintGraph<V> {
        &self.graph
    }

    pub fn initial_domains(&self) -> &BTreeMap<V, Vec<C>> {
        &self.domains
    }

    pub fn initial_domain(&self, variable: &V) -> &[C] {
        self.domains.get(variable).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}
