//! Seeded random instances for tests and benchmarks.
//!
//! Same seed, same graph, on every platform.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::graph::ConstraintGraph;
use crate::problem::SolveError;
use crate::Value;

fn graph_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Each pair `(a, b)` with `1 <= a < b <= n` is an edge with probability `p`.
/// `p` is clamped to `[0, 1]`; NaN means no edges.
pub fn random_edges(seed: u64, n: u32, p: f64) -> Vec<(u32, u32)> {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let mut rng = graph_rng(seed);
    let mut edges = Vec::new();
    for a in 1..=n {
        for b in a + 1..=n {
            if rng.gen_bool(p) {
                edges.push((a, b));
            }
        }
    }
    edges
}

/// Erdős–Rényi graph over variables `1..=n`.
pub fn random_graph(seed: u64, n: u32, p: f64) -> ConstraintGraph<u32> {
    let variables: Vec<u32> = (1..=n).collect();
    ConstraintGraph::from_trusted_edges(&variables, &random_edges(seed, n, p))
}

/// A non-empty random subset of `palette` per variable, in palette order.
pub fn random_domains<C: Value>(
    seed: u64,
    graph: &ConstraintGraph<u32>,
    palette: &[C],
) -> Result<BTreeMap<u32, Vec<C>>, SolveError> {
    if palette.is_empty() {
        return Err(SolveError::EmptyPalette);
    }
    let mut rng = graph_rng(seed);
    let domains = graph
        .variables()
        .map(|&v| {
            let mut picked: Vec<usize> = (0..palette.len()).collect();
            picked.shuffle(&mut rng);
            let keep = rng.gen_range(1..=palette.len());
            picked.truncate(keep);
            picked.sort_unstable();
            (v, picked.into_iter().map(|i| palette[i].clone()).collect())
        })
        .collect();
    Ok(domains)
}
