//! Tree-sitter backed HTML document.
use std::fs;
use std::ops::Range;
use std::path::Path;

use tracing::debug;
use tree_sitter::{Node as TsNode, Parser, Tree};

use super::{classes_match, decode_attribute, decode_entities, DocumentTree, MarkupElement};
use crate::errors::{ConceptMapError, Result};

/// An HTML document parsed with tree-sitter.
///
/// Line breaks are removed from the markup before parsing, matching how the
/// bubbl.us converter has always read its exports; labels that wrap across
/// lines are joined without a separator.
pub struct HtmlDocument {
    source: String,
    tree: Tree,
}

impl HtmlDocument {
    /// Parses HTML markup.
    pub fn parse(markup: &str) -> Result<Self> {
        let source: String = markup.chars().filter(|&c| c != '\n' && c != '\r').collect();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_html::LANGUAGE.into())
            .map_err(|e| ConceptMapError::Parse {
                message: format!("failed to load HTML grammar: {e}"),
            })?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| ConceptMapError::Parse {
                message: "tree-sitter parse returned None".to_string(),
            })?;

        debug!(
            bytes = source.len(),
            has_errors = tree.root_node().has_error(),
            "parsed HTML document"
        );

        Ok(Self { source, tree })
    }

    /// Reads and parses an HTML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let markup = fs::read_to_string(path)?;
        Self::parse(&markup)
    }

    /// The markup as parsed, with line breaks removed.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The document root. Its tag is empty.
    pub fn root(&self) -> HtmlElement<'_> {
        HtmlElement {
            node: self.tree.root_node(),
            source: &self.source,
        }
    }
}

impl DocumentTree for HtmlDocument {
    type Element<'a> = HtmlElement<'a>;

    fn find_all(&self, tag: &str, class: &str) -> Vec<HtmlElement<'_>> {
        self.root().find_all(tag, class)
    }
}

/// An element (or the document root) inside an [`HtmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct HtmlElement<'a> {
    node: TsNode<'a>,
    source: &'a str,
}

impl<'a> HtmlElement<'a> {
    /// Gets the source text covered by a tree-sitter node.
    fn node_text(&self, node: TsNode<'a>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// The opening tag of this element, if it is an element.
    fn start_tag(&self) -> Option<TsNode<'a>> {
        let mut cursor = self.node.walk();
        let found = self
            .node
            .named_children(&mut cursor)
            .find(|c| matches!(c.kind(), "start_tag" | "self_closing_tag"));
        found
    }

    /// Raw (undecoded) value of an attribute on the opening tag.
    fn raw_attribute(&self, name: &str) -> Option<&'a str> {
        let start = self.start_tag()?;
        let mut cursor = start.walk();
        let attributes: Vec<TsNode<'a>> = start
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "attribute")
            .collect();

        for attr in attributes {
            let mut attr_cursor = attr.walk();
            let mut attr_name = None;
            let mut value = None;
            for part in attr.named_children(&mut attr_cursor) {
                match part.kind() {
                    "attribute_name" => attr_name = Some(self.node_text(part)),
                    "attribute_value" => value = Some(self.node_text(part)),
                    "quoted_attribute_value" => {
                        let quoted = self.node_text(part);
                        value = Some(if quoted.len() >= 2 {
                            &quoted[1..quoted.len() - 1]
                        } else {
                            ""
                        });
                    }
                    _ => {}
                }
            }
            if attr_name.is_some_and(|n| n.eq_ignore_ascii_case(name)) {
                return Some(value.unwrap_or(""));
            }
        }
        None
    }

    fn matches(&self, tag: &str, class: &str) -> bool {
        if !tag.is_empty() && !self.tag().eq_ignore_ascii_case(tag) {
            return false;
        }
        classes_match(self.raw_attribute("class").unwrap_or(""), class)
    }

    /// Every element below this one, in document order.
    fn descendants(&self) -> Vec<HtmlElement<'a>> {
        let mut out = Vec::new();
        collect_elements(self.node, &mut out);
        out.into_iter()
            .map(|node| HtmlElement {
                node,
                source: self.source,
            })
            .collect()
    }
}

impl MarkupElement for HtmlElement<'_> {
    fn tag(&self) -> String {
        let Some(start) = self.start_tag() else {
            return String::new();
        };
        let mut cursor = start.walk();
        let name = start
            .named_children(&mut cursor)
            .find(|c| c.kind() == "tag_name")
            .map(|c| self.node_text(c).to_ascii_lowercase());
        name.unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.raw_attribute(name).map(decode_attribute)
    }

    fn text(&self) -> String {
        let mut markup = Vec::new();
        collect_markup(self.node, &mut markup);

        let mut raw = String::new();
        let mut pos = self.node.start_byte();
        for range in markup {
            if range.start > pos {
                raw.push_str(self.source.get(pos..range.start).unwrap_or(""));
            }
            pos = pos.max(range.end);
        }
        let end = self.node.end_byte();
        if end > pos {
            raw.push_str(self.source.get(pos..end).unwrap_or(""));
        }
        decode_entities(&raw)
    }

    fn find_all(&self, tag: &str, class: &str) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|e| e.matches(tag, class))
            .collect()
    }

    fn find(&self, tag: &str, class: &str) -> Option<Self> {
        self.descendants()
            .into_iter()
            .find(|e| e.matches(tag, class))
    }
}

fn is_element(node: TsNode<'_>) -> bool {
    matches!(node.kind(), "element" | "script_element" | "style_element")
}

/// Pre-order walk collecting element nodes below `node`.
fn collect_elements<'t>(node: TsNode<'t>, out: &mut Vec<TsNode<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if is_element(child) {
            out.push(child);
        }
        collect_elements(child, out);
    }
}

/// Nodes whose source is markup rather than text. The bare tokens only
/// show up loose inside ERROR subtrees.
fn is_markup(kind: &str) -> bool {
    matches!(
        kind,
        "doctype"
            | "start_tag"
            | "end_tag"
            | "self_closing_tag"
            | "erroneous_end_tag"
            | "comment"
            | "script_element"
            | "style_element"
            | "<"
            | "</"
            | ">"
            | "/>"
            | "tag_name"
            | "attribute"
    )
}

/// Pre-order walk collecting the byte ranges of markup below `node`, in
/// source order. Everything between them is text, including whatever the
/// parser could only recover as an ERROR node (a bare `&`, for instance).
fn collect_markup(node: TsNode<'_>, out: &mut Vec<Range<usize>>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if is_markup(child.kind()) {
            out.push(child.byte_range());
        } else {
            collect_markup(child, out);
        }
    }
}
