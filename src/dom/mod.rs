//! Minimal owned node tree for rendered markup.
//!
//! Backends hand back SVG as text; it is parsed into this tree, re-styled in
//! place and serialized again. Inline `style` attributes are kept as an ordered
//! list of declarations so individual properties can be read and overwritten.

mod html;
mod parse;
mod write;

use indexmap::IndexMap;

pub use parse::{parse_html_markup, parse_markup};

/// Read/write access to the styling surface of a node tree.
///
/// Re-theming only ever goes through this trait, so it can run against any tree
/// that can expose attributes, inline style properties and its descendants.
pub trait Styleable {
    fn tag_name(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    fn set_attribute(&mut self, name: &str, value: &str);
    fn style_property(&self, name: &str) -> Option<&str>;
    fn set_style_property(&mut self, name: &str, value: &str);
    /// Visit every descendant (pre-order, the node itself excluded).
    fn for_each_descendant_mut(&mut self, f: &mut dyn FnMut(&mut Self));
}

/// A child of an [`Element`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element with ordered attributes, inline style declarations and children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    style: IndexMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.set_style_property(property, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes other than `style`, in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Inline style declarations, in declaration order.
    pub fn style_declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.style.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        if name == "style" {
            let removed = self.style_text();
            self.style.clear();
            return (!removed.is_empty()).then_some(removed);
        }
        self.attributes.shift_remove(name)
    }

    /// The inline style serialized as `prop:value;prop:value`.
    pub fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn insert_child(&mut self, index: usize, child: impl Into<Node>) {
        let index = index.min(self.children.len());
        self.children.insert(index, child.into());
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Drop direct element children matching `pred`; text children are kept.
    pub fn retain_child_elements(&mut self, mut pred: impl FnMut(&Element) -> bool) {
        self.children.retain(|c| match c {
            Node::Element(el) => pred(el),
            Node::Text(_) => true,
        });
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace())
            .into_iter()
            .flatten()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.attributes.get("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.attributes.insert("class".to_string(), value);
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// First element named `name` in document order, the element itself included.
    pub fn find_first(&self, name: &str) -> Option<&Element> {
        if self.name.eq_ignore_ascii_case(name) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find_first(name))
    }

    /// Like [`Element::find_first`], but detaches and returns the match.
    pub fn into_first(self, name: &str) -> Option<Element> {
        if self.name.eq_ignore_ascii_case(name) {
            return Some(self);
        }
        self.children.into_iter().find_map(|c| match c {
            Node::Element(el) => el.into_first(name),
            Node::Text(_) => None,
        })
    }

    fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Node::Element(el) = child {
                f(el);
                el.walk_mut(f);
            }
        }
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
        }
    }
}

/// Split a CSS declaration list (`a: b; c: d`) into trimmed pairs.
///
/// Semicolons inside quotes or parentheses (`url("data:...;base64,...")`)
/// do not end a declaration.
pub(crate) fn parse_style_declarations(text: &str) -> Vec<(String, String)> {
    split_declarations(text)
        .into_iter()
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            let value = value.trim();
            (!prop.is_empty()).then(|| (prop.to_string(), value.to_string()))
        })
        .collect()
}

fn split_declarations(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut quote = None;
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                out.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&text[start..]);
    out
}

impl Styleable for Element {
    fn tag_name(&self) -> &str {
        &self.name
    }

    /// Inline style is not exposed here; use [`Styleable::style_property`].
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        if name == "style" {
            self.style = parse_style_declarations(value).into_iter().collect();
            return;
        }
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_string(), value.to_string());
    }

    fn for_each_descendant_mut(&mut self, f: &mut dyn FnMut(&mut Self)) {
        self.walk_mut(f);
    }
}
