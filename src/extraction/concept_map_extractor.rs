use std::collections::HashSet;
use std::time::Instant;

use tracing::debug;

use super::lookup::IdentifierLookup;
use super::resolve_label;
use crate::config::ExtractorConfig;
use crate::document::{DocumentTree, MarkupElement};
use crate::errors::{ConceptMapError, Result};
use crate::types::{Edge, Graph, Node, FIRST_NODE_ID};

/// Which side of a bubble a connector container describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Incoming,
    Outgoing,
}

/// Extracts concept-map graphs from parsed bubbl.us exports.
#[derive(Debug, Clone, Default)]
pub struct ConceptMapExtractor {
    config: ExtractorConfig,
}

/// A bubble found in the document together with its ids.
struct Entity<E> {
    element: E,
    raw_id: String,
    id: usize,
}

impl ConceptMapExtractor {
    /// Creates an extractor using the given markup conventions.
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Returns the markup conventions in use.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts the concept map from `document`.
    ///
    /// Runs in two passes: the first finds every bubble and assigns its
    /// dense id, the second emits nodes and resolves connectors against the
    /// now complete id table. Either the whole graph is produced or an error
    /// is returned.
    pub fn extract<D: DocumentTree>(&self, document: &D) -> Result<Graph> {
        let start = Instant::now();
        let config = &self.config;

        let elements = document.find_all(&config.container_tag, &config.entity_class);
        let (entities, lookup) = self.assign_ids(elements)?;

        let mut nodes = Vec::with_capacity(entities.len());
        let mut edges = Vec::new();
        for entity in &entities {
            nodes.push(Node {
                id: entity.id,
                description: self.bubble_text(entity)?,
            });
            self.collect_edges(entity, Direction::Incoming, &lookup, &mut edges)?;
            self.collect_edges(entity, Direction::Outgoing, &lookup, &mut edges)?;
        }

        let connector_count = edges.len();
        let edges = dedup_edges(edges);

        debug!(
            nodes = nodes.len(),
            connectors = connector_count,
            edges = edges.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "extracted concept map"
        );

        Ok(Graph { nodes, edges })
    }

    /// First pass: builds the identifier table for every bubble.
    fn assign_ids<E: MarkupElement>(
        &self,
        elements: Vec<E>,
    ) -> Result<(Vec<Entity<E>>, IdentifierLookup)> {
        let mut lookup = IdentifierLookup::with_capacity(elements.len());
        let mut entities = Vec::with_capacity(elements.len());

        for (position, element) in elements.into_iter().enumerate() {
            let raw_id = element
                .attribute(&self.config.entity_id_attribute)
                .ok_or_else(|| ConceptMapError::MalformedInput {
                    entity: format!("bubble #{position}"),
                    message: format!(
                        "missing '{}' attribute",
                        self.config.entity_id_attribute
                    ),
                })?;
            let id = lookup
                .assign(&raw_id, FIRST_NODE_ID)
                .ok_or_else(|| ConceptMapError::MalformedInput {
                    entity: raw_id.clone(),
                    message: "identifier is shared by more than one bubble".to_string(),
                })?;
            entities.push(Entity {
                element,
                raw_id,
                id,
            });
        }

        debug!(entities = lookup.len(), "assigned dense ids");
        Ok((entities, lookup))
    }

    /// Trimmed label of a bubble.
    fn bubble_text<E: MarkupElement>(&self, entity: &Entity<E>) -> Result<String> {
        let config = &self.config;
        let text = entity
            .element
            .find(&config.container_tag, &config.text_class)
            .ok_or_else(|| missing_child(entity, &config.text_class))?;
        Ok(text.text().trim().to_string())
    }

    /// Second pass: turns the connectors of one container into edges.
    fn collect_edges<E: MarkupElement>(
        &self,
        entity: &Entity<E>,
        direction: Direction,
        lookup: &IdentifierLookup,
        edges: &mut Vec<Edge>,
    ) -> Result<()> {
        let config = &self.config;
        let container_class = match direction {
            Direction::Incoming => &config.incoming_class,
            Direction::Outgoing => &config.outgoing_class,
        };
        let container = entity
            .element
            .find(&config.container_tag, container_class)
            .ok_or_else(|| missing_child(entity, container_class))?;

        for connector in container.find_all(&config.line_tag, &config.line_class) {
            edges.push(self.create_edge(&connector, entity, direction, lookup)?);
        }
        Ok(())
    }

    /// Builds the edge described by a single connector.
    fn create_edge<E: MarkupElement>(
        &self,
        connector: &E,
        entity: &Entity<E>,
        direction: Direction,
        lookup: &IdentifierLookup,
    ) -> Result<Edge> {
        let config = &self.config;
        let href = connector
            .attribute(&config.reference_attribute)
            .ok_or_else(|| missing_attribute(entity, &config.reference_attribute))?;
        let reference = href.strip_prefix('#').unwrap_or(&href);
        let other = lookup
            .resolve(reference)
            .ok_or_else(|| ConceptMapError::UnresolvedReference {
                reference: reference.to_string(),
                entity: entity.raw_id.clone(),
            })?;

        let title = connector
            .attribute(&config.title_attribute)
            .ok_or_else(|| missing_attribute(entity, &config.title_attribute))?;
        let description = resolve_label(&title, &connector.text());

        let (from, to) = match direction {
            Direction::Incoming => (other, entity.id),
            Direction::Outgoing => (entity.id, other),
        };
        Ok(Edge {
            from,
            to,
            description,
        })
    }
}

fn missing_child<E>(entity: &Entity<E>, class: &str) -> ConceptMapError {
    ConceptMapError::MalformedInput {
        entity: entity.raw_id.clone(),
        message: format!("no '{class}' element inside bubble"),
    }
}

fn missing_attribute<E>(entity: &Entity<E>, attribute: &str) -> ConceptMapError {
    ConceptMapError::MalformedInput {
        entity: entity.raw_id.clone(),
        message: format!("connector without '{attribute}' attribute"),
    }
}

/// Drops repeated `(from, to, description)` triples, keeping the first
/// occurrence of each. The same link usually shows up twice: once among the
/// outgoing connectors of its source and once among the incoming connectors
/// of its target.
fn dedup_edges(edges: Vec<Edge>) -> Vec<Edge> {
    let mut seen = HashSet::with_capacity(edges.len());
    edges.into_iter().filter(|e| seen.insert(e.clone())).collect()
}
