//! [`Element`] tree → markup text.

use super::{Element, Node};

impl Element {
    /// Serialize this element and its subtree as XML.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }

    /// Serialize only the children, as a host container's inner markup.
    pub fn inner_markup(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            write_node(child, &mut out);
        }
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(el) => write_element(el, out),
        Node::Text(text) => out.push_str(&escape_xml(text)),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.name());
    for (name, value) in el.attributes() {
        out.push_str(&format!(r#" {}="{}""#, name, escape_xml(value)));
    }
    let style = el.style_text();
    if !style.is_empty() {
        out.push_str(&format!(r#" style="{}""#, escape_xml(&style)));
    }

    if el.children().is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in el.children() {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(el.name());
    out.push('>');
}

pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
