//! Compressed sparse row form of a review similarity graph
//!
//! PageRank only ever walks a node's neighbor list, so rows are laid out
//! contiguously and frozen once built.

use super::builder::GraphBuilder;

/// Review similarity graph in compressed sparse row layout
///
/// Every undirected edge appears in the rows of both endpoints, with
/// neighbors sorted by review index.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    pub num_nodes: usize,
    /// `targets[offsets[i]..offsets[i + 1]]` are the neighbors of review `i`
    pub offsets: Vec<usize>,
    pub targets: Vec<u32>,
    pub weights: Vec<f64>,
    /// Sum of incident edge weights per review
    pub strength: Vec<f64>,
}

impl CsrGraph {
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut graph = Self {
            num_nodes,
            offsets: Vec::with_capacity(num_nodes + 1),
            targets: Vec::with_capacity(builder.edge_count() * 2),
            weights: Vec::with_capacity(builder.edge_count() * 2),
            strength: Vec::with_capacity(num_nodes),
        };
        graph.offsets.push(0);

        for (_, node) in builder.nodes() {
            let mut row: Vec<(u32, f64)> = node.edges.iter().map(|(&j, &w)| (j, w)).collect();
            row.sort_unstable_by_key(|&(j, _)| j);

            let mut strength = 0.0;
            for (j, w) in row {
                graph.targets.push(j);
                graph.weights.push(w);
                strength += w;
            }
            graph.strength.push(strength);
            graph.offsets.push(graph.targets.len());
        }
        graph
    }

    fn row(&self, node: u32) -> std::ops::Range<usize> {
        self.offsets[node as usize]..self.offsets[node as usize + 1]
    }

    /// `(neighbor, weight)` pairs of a review, by ascending neighbor index
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.row(node).map(move |e| (self.targets[e], self.weights[e]))
    }

    pub fn degree(&self, node: u32) -> usize {
        self.row(node).len()
    }

    pub fn strength(&self, node: u32) -> f64 {
        self.strength[node as usize]
    }

    pub fn edge_weight(&self, from: u32, to: u32) -> Option<f64> {
        let row = self.row(from);
        let start = row.start;
        self.targets[row]
            .binary_search(&to)
            .ok()
            .map(|e| self.weights[start + e])
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Undirected edges, each counted once
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    /// Reviews with no positive-similarity partner
    pub fn isolated_count(&self) -> usize {
        (0..self.num_nodes as u32).filter(|&n| self.degree(n) == 0).count()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::from_builder(&GraphBuilder::new())
    }
}
