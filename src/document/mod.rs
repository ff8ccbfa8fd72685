/// Navigable markup trees consumed by the extractor.
///
/// The extractor only talks to the traits below; `HtmlDocument` is the
/// tree-sitter backed implementation used for real exports.
mod html;

pub use html::{HtmlDocument, HtmlElement};

/// A single element of a parsed document.
pub trait MarkupElement: Sized {
    /// Lower-cased tag name, empty for non-element nodes such as the
    /// document root.
    fn tag(&self) -> String;

    /// Value of the attribute `name`, with character references decoded.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Concatenated text of all descendants, untrimmed.
    fn text(&self) -> String;

    /// All descendants matching `tag` and `class`, in document order.
    ///
    /// `class` is a whitespace-separated class list; see [`classes_match`].
    fn find_all(&self, tag: &str, class: &str) -> Vec<Self>;

    /// First descendant matching `tag` and `class`.
    fn find(&self, tag: &str, class: &str) -> Option<Self> {
        self.find_all(tag, class).into_iter().next()
    }
}

/// A parsed document that can be searched for elements.
pub trait DocumentTree {
    type Element<'a>: MarkupElement
    where
        Self: 'a;

    /// All elements matching `tag` and `class`, in document order.
    fn find_all(&self, tag: &str, class: &str) -> Vec<Self::Element<'_>>;
}

/// Returns true when `class_attr` carries every class named in `selector`.
///
/// Order does not matter and an empty selector matches anything.
pub fn classes_match(class_attr: &str, selector: &str) -> bool {
    let classes: Vec<&str> = class_attr.split_whitespace().collect();
    selector
        .split_whitespace()
        .all(|wanted| classes.contains(&wanted))
}

/// Decodes HTML character references in text content.
///
/// Covers the full HTML5 named-reference table, numeric references, and the
/// legacy forms written without a trailing semicolon. A `&` that does not
/// start a reference is kept as is.
pub fn decode_entities(raw: &str) -> String {
    htmlize::unescape(raw).into_owned()
}

/// Decodes HTML character references in an attribute value.
///
/// Same as [`decode_entities`], except that a semicolon-less reference
/// followed by `=` or an alphanumeric character stays literal, as HTML
/// requires inside attributes (think `href="?a=1&copy=2"`).
pub fn decode_attribute(raw: &str) -> String {
    htmlize::unescape_attribute(raw).into_owned()
}
