//! Markup text → [`Element`] tree, via roxmltree.

use super::html;
use super::{Element, Node, Styleable};
use crate::error::MarkupError;

/// Parse XML/SVG markup into an owned tree rooted at the document element.
///
/// Comments and processing instructions are dropped, as are whitespace-only
/// text nodes between elements. Namespace declarations are kept on every
/// element that introduces or rebinds one, so embedded XHTML survives a
/// round trip.
pub fn parse_markup(text: &str) -> Result<Element, MarkupError> {
    let doc = roxmltree::Document::parse(text)?;
    Ok(build_element(doc.root_element()))
}

/// Parse SVG as a browser's HTML parser would accept it.
///
/// mermaid.js serializes through `innerHTML`, so its output may carry
/// unclosed void elements (`<br>`) and HTML named entities (`&nbsp;`).
/// Those are rewritten into well-formed XML before parsing.
pub fn parse_html_markup(text: &str) -> Result<Element, MarkupError> {
    parse_markup(&html::to_xml(text))
}

fn build_element(node: roxmltree::Node<'_, '_>) -> Element {
    let mut el = Element::new(qualified_name(node));

    let parent = node.parent_element();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") {
            continue;
        }
        let inherited = parent.is_some_and(|p| {
            p.namespaces()
                .any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri())
        });
        if inherited {
            continue;
        }
        match ns.name() {
            Some(prefix) => el.set_attribute(&format!("xmlns:{}", prefix), ns.uri()),
            None => el.set_attribute("xmlns", ns.uri()),
        }
    }

    for attr in node.attributes() {
        let name = match attr.namespace().and_then(|uri| node.lookup_prefix(uri)) {
            Some(prefix) => format!("{}:{}", prefix, attr.name()),
            None => attr.name().to_string(),
        };
        el.set_attribute(&name, attr.value());
    }

    for child in node.children() {
        if child.is_element() {
            el.append_child(build_element(child));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                if !text.trim().is_empty() {
                    el.append_child(Node::Text(text.to_string()));
                }
            }
        }
    }
    el
}

/// Element name, prefixed when it is not in the default namespace.
fn qualified_name(node: roxmltree::Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace() {
        Some(uri) if node.default_namespace() != Some(uri) => match node.lookup_prefix(uri) {
            Some(prefix) => format!("{}:{}", prefix, tag.name()),
            None => tag.name().to_string(),
        },
        _ => tag.name().to_string(),
    }
}
