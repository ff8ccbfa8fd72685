use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// First id handed out by the extractor. Every output representation is
/// zero-based.
pub const FIRST_NODE_ID: usize = 0;

/// A concept in the map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub description: String,
}

/// A directed link between two concepts.
///
/// `description` is empty unless the connector carried a label of its own.
/// Two edges are the same edge when all three fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub description: String,
}

/// A concept map as nodes (document order) and deduplicated edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Serializes the graph to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the graph to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a graph back from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the node with the given id, if any.
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges leaving `id`.
    pub fn outgoing(&self, id: usize) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    /// Edges arriving at `id`.
    pub fn incoming(&self, id: usize) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.to == id)
    }
}

/// Dense matrix form of a [`Graph`].
///
/// `adjacency[[i, j]] == 1` means there is a link from node `i` to node `j`;
/// the reverse is not implied. Several edges between the same pair collapse
/// into one cell, and `edge_descriptions` keeps the label written last.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    pub adjacency: Array2<u8>,
    pub node_names: Vec<String>,
    pub edge_descriptions: Array2<String>,
}

impl AdjacencyMatrix {
    /// Number of nodes, i.e. the side length of the matrix.
    pub fn node_count(&self) -> usize {
        self.node_names.len()
    }

    /// Number of connected cells.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().filter(|&&cell| cell != 0).count()
    }

    /// Whether there is a link from `from` to `to`. Out-of-range indices
    /// are simply unconnected.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.adjacency.get((from, to)).is_some_and(|&cell| cell != 0)
    }

    /// The label of the link from `from` to `to`, or `None` when the cell is
    /// unconnected or unlabeled.
    pub fn edge_description(&self, from: usize, to: usize) -> Option<&str> {
        if !self.has_edge(from, to) {
            return None;
        }
        self.edge_descriptions
            .get((from, to))
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }

    /// Indices of the nodes `node` links to.
    pub fn successors(&self, node: usize) -> Vec<usize> {
        if node >= self.node_count() {
            return Vec::new();
        }
        self.adjacency
            .row(node)
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .map(|(j, _)| j)
            .collect()
    }

    /// Indices of the nodes linking to `node`.
    pub fn predecessors(&self, node: usize) -> Vec<usize> {
        if node >= self.node_count() {
            return Vec::new();
        }
        self.adjacency
            .column(node)
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// The matrix as nested rows.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.adjacency
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }

    /// Builds the serializable view of this matrix.
    pub fn report(&self) -> MatrixReport {
        MatrixReport {
            adjacency: self.rows(),
            node_names: self.node_names.clone(),
            edge_descriptions: self
                .edge_descriptions
                .rows()
                .into_iter()
                .map(|row| row.to_vec())
                .collect(),
        }
    }
}

/// Plain nested-array view of an [`AdjacencyMatrix`] for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixReport {
    pub adjacency: Vec<Vec<u8>>,
    pub node_names: Vec<String>,
    pub edge_descriptions: Vec<Vec<String>>,
}
