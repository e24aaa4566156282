use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::page::{Element, Node, Page};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Page {
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        write_element(&self.root, &mut out);
        out.push('\n');
        out
    }
}

impl Element {
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }

    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            write_node(child, &mut out);
        }
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&encode_text(text)),
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.tag());
    for (name, value) in element.attrs() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag()) {
        return;
    }

    for child in element.children() {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(element.tag());
    out.push('>');
}
