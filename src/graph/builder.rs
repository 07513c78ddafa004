//! Similarity graph builder
//!
//! Reviews of one hotel are connected pairwise by cosine similarity. The
//! builder keeps a hash map per review while edges are added; it is frozen
//! into a [`CsrGraph`](super::CsrGraph) before ranking.

use crate::features::ReviewVector;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Below this many reviews the sequential pairwise pass is faster
const PARALLEL_MIN_REVIEWS: usize = 512;

/// A node in the graph builder
#[derive(Debug, Clone, Default)]
pub struct BuilderNode {
    /// Adjacency list: neighbor review index -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

/// A mutable undirected graph over review indices `0..n`
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create an empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with `num_nodes` isolated nodes
    pub fn with_nodes(num_nodes: usize) -> Self {
        Self {
            nodes: vec![BuilderNode::default(); num_nodes],
        }
    }

    /// Set the weight of the undirected edge between two nodes
    ///
    /// Self-loops, non-positive weights and unknown nodes are ignored.
    pub fn add_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to || weight <= 0.0 || weight.is_nan() {
            return;
        }
        if from as usize >= self.nodes.len() || to as usize >= self.nodes.len() {
            return;
        }

        self.nodes[from as usize].edges.insert(to, weight);
        self.nodes[to as usize].edges.insert(from, weight);
    }

    /// Build the similarity graph of one hotel's review vectors
    ///
    /// Every unordered pair with positive cosine similarity becomes an edge
    /// weighted by that similarity, capped at 1.0. Reviews without a positive
    /// partner stay as isolated nodes.
    pub fn from_vectors(vectors: &[ReviewVector]) -> Self {
        let mut builder = Self::with_nodes(vectors.len());

        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                let weight = similarity_weight(&vectors[i], &vectors[j]);
                builder.add_edge(i as u32, j as u32, weight);
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Weight of the edge between two nodes, if present
    pub fn edge_weight(&self, from: u32, to: u32) -> Option<f64> {
        self.get_node(from).and_then(|n| n.edges.get(&to).copied())
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Edge weight for a pair of unit vectors; zero or negative means no edge
pub fn similarity_weight(a: &ReviewVector, b: &ReviewVector) -> f64 {
    a.cosine_similarity(b).min(1.0)
}

/// Build a similarity graph, computing rows in parallel for large hotels
///
/// Produces exactly the same graph as [`GraphBuilder::from_vectors`].
pub fn build_graph_parallel(vectors: &[ReviewVector]) -> GraphBuilder {
    // For small hotels, sequential is faster
    if vectors.len() < PARALLEL_MIN_REVIEWS {
        return GraphBuilder::from_vectors(vectors);
    }

    // Upper-triangle neighbors for each row
    let partial_rows: Vec<Vec<(u32, f64)>> = (0..vectors.len())
        .into_par_iter()
        .map(|i| {
            ((i + 1)..vectors.len())
                .filter_map(|j| {
                    let weight = similarity_weight(&vectors[i], &vectors[j]);
                    (weight > 0.0).then_some((j as u32, weight))
                })
                .collect()
        })
        .collect();

    // Merge partial rows
    let mut builder = GraphBuilder::with_nodes(vectors.len());
    for (i, row) in partial_rows.into_iter().enumerate() {
        for (j, weight) in row {
            builder.add_edge(i as u32, j, weight);
        }
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors(rows: &[&[u8]]) -> Vec<ReviewVector> {
        rows.iter().map(|r| ReviewVector::from_flags(r)).collect()
    }

    #[test]
    fn test_edge_is_symmetric() {
        let mut builder = GraphBuilder::with_nodes(2);
        builder.add_edge(0, 1, 0.5);

        assert_eq!(builder.edge_weight(0, 1), Some(0.5));
        assert_eq!(builder.edge_weight(1, 0), Some(0.5));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::with_nodes(1);
        builder.add_edge(0, 0, 1.0);

        // No self-loop should be created
        let node = builder.get_node(0).unwrap();
        assert!(node.edges.is_empty());
    }

    #[test]
    fn test_non_positive_weights_skipped() {
        let mut builder = GraphBuilder::with_nodes(3);
        builder.add_edge(0, 1, 0.0);
        builder.add_edge(1, 2, -0.3);

        assert_eq!(builder.edge_count(), 0);
        assert_eq!(builder.node_count(), 3);
    }

    #[test]
    fn test_from_vectors_two_topic_example() {
        // [1,0], [1,0], [0,1] over one positive and one negative flag
        let builder = GraphBuilder::from_vectors(&vectors(&[&[1, 0], &[1, 0], &[0, 1]]));

        assert_eq!(builder.node_count(), 3);
        assert_eq!(builder.edge_count(), 1);
        assert!((builder.edge_weight(0, 1).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(builder.edge_weight(0, 2), None);
        assert_eq!(builder.edge_weight(1, 2), None);
    }

    #[test]
    fn test_zero_vectors_stay_isolated() {
        let builder = GraphBuilder::from_vectors(&vectors(&[&[0, 0], &[1, 0], &[1, 0]]));

        assert!(builder.get_node(0).unwrap().edges.is_empty());
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(GraphBuilder::from_vectors(&[]).is_empty());

        let single = GraphBuilder::from_vectors(&vectors(&[&[1, 1]]));
        assert_eq!(single.node_count(), 1);
        assert_eq!(single.edge_count(), 0);
    }

    #[test]
    fn test_weights_capped_at_one() {
        let builder = GraphBuilder::from_vectors(&vectors(&[&[1, 1, 1], &[1, 1, 1]]));
        let w = builder.edge_weight(0, 1).unwrap();
        assert!(w > 0.0 && w <= 1.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rows: Vec<Vec<u8>> = (0..PARALLEL_MIN_REVIEWS + 7)
            .map(|i| vec![(i % 2) as u8, (i % 3 == 0) as u8, (i % 5 == 0) as u8, 0])
            .collect();
        let vecs: Vec<_> = rows.iter().map(|r| ReviewVector::from_flags(r)).collect();

        let seq = GraphBuilder::from_vectors(&vecs);
        let par = build_graph_parallel(&vecs);

        assert_eq!(seq.node_count(), par.node_count());
        assert_eq!(seq.edge_count(), par.edge_count());
        for (id, node) in seq.nodes() {
            for (&nbr, &w) in &node.edges {
                assert_eq!(par.edge_weight(id, nbr), Some(w));
            }
        }
    }
}
