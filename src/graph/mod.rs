//! Graph construction and representation
//!
//! This module provides the per-hotel review similarity graph: a mutable
//! builder filled by pairwise cosine similarity, and a CSR form for ranking.

pub mod builder;
pub mod csr;

pub use builder::{build_graph_parallel, GraphBuilder};
pub use csr::CsrGraph;
