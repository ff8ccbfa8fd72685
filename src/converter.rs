use std::path::Path;

use tracing::info;

use crate::config::ExtractorConfig;
use crate::document::HtmlDocument;
use crate::errors::Result;
use crate::extraction::ConceptMapExtractor;
use crate::projection::MatrixProjector;
use crate::types::{AdjacencyMatrix, Graph};

/// Converts one bubbl.us HTML export into structured representations.
///
/// Every conversion extracts the graph afresh from the parsed document;
/// nothing is cached between calls.
pub struct Converter {
    document: HtmlDocument,
    extractor: ConceptMapExtractor,
}

impl Converter {
    /// Parses `markup` using the default bubbl.us conventions.
    pub fn from_html(markup: &str) -> Result<Self> {
        Self::from_html_with_config(markup, ExtractorConfig::default())
    }

    /// Parses `markup` using the given conventions.
    pub fn from_html_with_config(markup: &str, config: ExtractorConfig) -> Result<Self> {
        Ok(Self {
            document: HtmlDocument::parse(markup)?,
            extractor: ConceptMapExtractor::new(config),
        })
    }

    /// Loads and parses an exported HTML file.
    pub fn open(path: &Path, config: ExtractorConfig) -> Result<Self> {
        let document = HtmlDocument::from_file(path)?;
        info!(path = %path.display(), "loaded concept map export");
        Ok(Self {
            document,
            extractor: ConceptMapExtractor::new(config),
        })
    }

    /// Extracts the concept map as a graph.
    pub fn to_graph(&self) -> Result<Graph> {
        let graph = self.extractor.extract(&self.document)?;
        info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "converted concept map"
        );
        Ok(graph)
    }

    /// Extracts the concept map as a compact JSON document.
    pub fn to_json(&self) -> Result<String> {
        self.to_graph()?.to_json()
    }

    /// Extracts the concept map and projects it onto an adjacency matrix.
    pub fn to_adjacency(&self) -> Result<AdjacencyMatrix> {
        let graph = self.to_graph()?;
        MatrixProjector::default().project(&graph)
    }

    /// Returns the extractor in use.
    pub fn extractor(&self) -> &ConceptMapExtractor {
        &self.extractor
    }
}
