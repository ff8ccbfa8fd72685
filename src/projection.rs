use ndarray::Array2;
use tracing::debug;

use crate::errors::{ConceptMapError, Result};
use crate::types::{AdjacencyMatrix, Graph, FIRST_NODE_ID};

/// Projects a [`Graph`] onto an adjacency matrix.
///
/// The projector needs to know which id the graph's first node carries.
/// Graphs from [`ConceptMapExtractor`](crate::extraction::ConceptMapExtractor)
/// start at [`FIRST_NODE_ID`]; graphs loaded from elsewhere may be one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixProjector {
    id_base: usize,
}

impl Default for MatrixProjector {
    fn default() -> Self {
        Self {
            id_base: FIRST_NODE_ID,
        }
    }
}

impl MatrixProjector {
    /// Creates a projector for graphs whose ids start at `id_base`.
    pub fn with_id_base(id_base: usize) -> Self {
        Self { id_base }
    }

    /// The id of the node placed in row and column zero.
    pub fn id_base(&self) -> usize {
        self.id_base
    }

    /// Builds the adjacency matrix, node names and edge labels of `graph`.
    ///
    /// Node ids must cover `id_base..id_base + N` exactly once each. Edges
    /// between the same pair share a cell; the cell's label is the one of
    /// the last such edge in `graph.edges`.
    pub fn project(&self, graph: &Graph) -> Result<AdjacencyMatrix> {
        let n = graph.nodes.len();

        let mut node_names: Vec<Option<String>> = vec![None; n];
        for node in &graph.nodes {
            let index = self.index_of(node.id, n)?;
            if node_names[index].is_some() {
                return Err(ConceptMapError::DuplicateNodeId { id: node.id });
            }
            node_names[index] = Some(node.description.clone());
        }
        // n distinct in-range ids fill every slot.
        let node_names: Vec<String> = node_names.into_iter().flatten().collect();

        let mut adjacency = Array2::<u8>::zeros((n, n));
        let mut edge_descriptions = Array2::<String>::from_elem((n, n), String::new());
        for edge in &graph.edges {
            let from = self.index_of(edge.from, n)?;
            let to = self.index_of(edge.to, n)?;
            adjacency[[from, to]] = 1;
            edge_descriptions[[from, to]] = edge.description.clone();
        }

        debug!(
            nodes = n,
            edges = graph.edges.len(),
            id_base = self.id_base,
            "projected graph onto adjacency matrix"
        );

        Ok(AdjacencyMatrix {
            adjacency,
            node_names,
            edge_descriptions,
        })
    }

    /// Maps a node id to its row/column index.
    fn index_of(&self, id: usize, node_count: usize) -> Result<usize> {
        id.checked_sub(self.id_base)
            .filter(|&index| index < node_count)
            .ok_or(ConceptMapError::InvalidNodeId { id, node_count })
    }
}
