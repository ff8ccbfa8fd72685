/// Concept-map extraction.
///
/// Walks a parsed bubbl.us export and produces a [`Graph`](crate::types::Graph)
/// of concepts and the links between them.
mod concept_map_extractor;
mod lookup;

pub use concept_map_extractor::ConceptMapExtractor;

/// Normalizes a connector label for comparison.
///
/// Every non-ASCII or control character (the arrow glyphs bubbl.us puts in
/// front of link text, non-breaking spaces) becomes a space, then the
/// result is trimmed.
pub fn clean_label(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.trim().to_string()
}

/// Works out the description of an edge from its connector.
///
/// bubbl.us stamps every link with a `title`, but the visible text is what
/// the user actually typed on the diagram. When the two disagree the visible
/// text is the real label; when they agree the link has no label.
pub fn resolve_label(title: &str, text: &str) -> String {
    let title = clean_label(title);
    let text = clean_label(text);
    if title != text {
        text
    } else {
        String::new()
    }
}
