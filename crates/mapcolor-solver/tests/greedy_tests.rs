use mapcolor_solver::generate::{random_edges, random_graph};
use mapcolor_solver::graph::adjacency_from_edges;
use mapcolor_solver::greedy::degree_order;
use mapcolor_solver::validate::coloring_conflicts;
use mapcolor_solver::{greedy_color, Adjacency};

#[test]
fn test_complete_graph_with_small_palette() {
    let variables: Vec<u32> = (1..=6).collect();
    let adjacency = adjacency_from_edges(&random_edges(0, 6, 1.0));
    let coloring = greedy_color(&variables, &adjacency, &['r', 'g', 'b']).unwrap();

    assert_eq!(coloring.len(), 6);
    assert_eq!(coloring.values().filter(|c| c.is_some()).count(), 3);
    assert_eq!(coloring.values().filter(|c| c.is_none()).count(), 3);
}

#[test]
fn test_greedy_never_conflicts_on_colored_pairs() {
    for seed in 0..16 {
        let graph = random_graph(seed, 12, 0.5);
        let variables: Vec<u32> = graph.variables().copied().collect();
        let adjacency: Adjacency<u32> = graph
            .variables()
            .map(|v| (*v, graph.neighbors(v).copied().collect()))
            .collect();
        let coloring = greedy_color(&variables, &adjacency, &['r', 'g', 'b']).unwrap();

        assert_eq!(coloring.len(), variables.len());
        assert!(coloring_conflicts(&graph, &coloring).is_empty(), "seed {seed}");
    }
}

#[test]
fn test_order_is_deterministic() {
    let graph = random_graph(5, 20, 0.3);
    let order = degree_order(&graph);
    assert_eq!(order, degree_order(&graph));
    for pair in order.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (da, db) = (graph.degree(&a), graph.degree(&b));
        assert!(da > db || (da == db && a < b));
    }
}
