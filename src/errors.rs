use thiserror::Error;

/// Errors that can occur while converting a concept map.
#[derive(Error, Debug)]
pub enum ConceptMapError {
    #[error("malformed input: {message} (entity: {entity})")]
    MalformedInput { entity: String, message: String },

    #[error("unresolved reference: '{reference}' does not name a concept (entity: {entity})")]
    UnresolvedReference { reference: String, entity: String },

    #[error("invalid node id: {id} is outside the {node_count} node(s) of the graph")]
    InvalidNodeId { id: usize, node_count: usize },

    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: usize },

    #[error("parse error: {message}")]
    Parse { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `ConceptMapError`.
pub type Result<T> = std::result::Result<T, ConceptMapError>;
