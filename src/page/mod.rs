//! In-memory page tree that the renderers write into.
//!
//! Only what the loader needs: elements with ordered attributes, text nodes,
//! a handful of selector shapes, and HTML serialization.

mod cleanup;
mod html;
mod skeleton;

pub use cleanup::clean_placeholder_brackets;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    fn text_content_into(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.text_content_into(out);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attr("class", joined);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Drop all children, like assigning `innerHTML = ''`.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.text_content_into(&mut out);
        }
        out
    }
}

/// The selector shapes the renderers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// `.class`
    Class(&'a str),
    /// `[name]`
    HasAttr(&'a str),
    /// `[name="value"]`
    Attr { name: &'a str, value: &'a str },
    /// `tag.class`
    TagClass { tag: &'a str, class: &'a str },
    /// `tag.class[id^="prefix"]`
    TagClassIdPrefix {
        tag: &'a str,
        class: &'a str,
        prefix: &'a str,
    },
}

impl Selector<'_> {
    pub fn matches(&self, element: &Element) -> bool {
        match *self {
            Selector::Class(class) => element.has_class(class),
            Selector::HasAttr(name) => element.attr(name).is_some(),
            Selector::Attr { name, value } => element.attr(name) == Some(value),
            Selector::TagClass { tag, class } => element.tag() == tag && element.has_class(class),
            Selector::TagClassIdPrefix { tag, class, prefix } => {
                element.tag() == tag
                    && element.has_class(class)
                    && element.id().is_some_and(|id| id.starts_with(prefix))
            }
        }
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::HasAttr(name) => write!(f, "[{}]", name),
            Selector::Attr { name, value } => write!(f, "[{}=\"{}\"]", name, value),
            Selector::TagClass { tag, class } => write!(f, "{}.{}", tag, class),
            Selector::TagClassIdPrefix { tag, class, prefix } => {
                write!(f, "{}.{}[id^=\"{}\"]", tag, class, prefix)
            }
        }
    }
}

/// A whole document rooted at `<html>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    root: Element,
}

impl Page {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// First match in document order.
    pub fn query(&self, selector: &Selector<'_>) -> Option<&Element> {
        fn find<'e>(element: &'e Element, selector: &Selector<'_>) -> Option<&'e Element> {
            if selector.matches(element) {
                return Some(element);
            }
            element.child_elements().find_map(|child| find(child, selector))
        }
        find(&self.root, selector)
    }

    pub fn query_mut(&mut self, selector: &Selector<'_>) -> Option<&mut Element> {
        fn find<'e>(element: &'e mut Element, selector: &Selector<'_>) -> Option<&'e mut Element> {
            if selector.matches(element) {
                return Some(element);
            }
            for child in element.children.iter_mut() {
                if let Node::Element(child) = child {
                    if let Some(found) = find(child, selector) {
                        return Some(found);
                    }
                }
            }
            None
        }
        find(&mut self.root, selector)
    }

    /// Every match in document order.
    pub fn query_all(&self, selector: &Selector<'_>) -> Vec<&Element> {
        fn collect<'e>(element: &'e Element, selector: &Selector<'_>, out: &mut Vec<&'e Element>) {
            if selector.matches(element) {
                out.push(element);
            }
            for child in element.child_elements() {
                collect(child, selector, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.root, selector, &mut out);
        out
    }

    /// Visit every match in document order with its position among matches.
    ///
    /// Matched elements are not searched for nested matches, so `f` may
    /// replace their children freely. Returns the number of matches.
    pub fn for_each_mut<F>(&mut self, selector: &Selector<'_>, mut f: F) -> usize
    where
        F: FnMut(usize, &mut Element),
    {
        fn walk<F>(element: &mut Element, selector: &Selector<'_>, f: &mut F, seen: &mut usize)
        where
            F: FnMut(usize, &mut Element),
        {
            if selector.matches(element) {
                f(*seen, element);
                *seen += 1;
                return;
            }
            for child in element.children.iter_mut() {
                if let Node::Element(child) = child {
                    walk(child, selector, f, seen);
                }
            }
        }

        let mut seen = 0;
        walk(&mut self.root, selector, &mut f, &mut seen);
        seen
    }
}
