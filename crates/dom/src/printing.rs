//! Tree serialization for debugging and test snapshots.

use crate::tree::{DomTree, NodeData, NodeId};
use serde_json::{Map, Value, json};
use std::fmt;

// -----------------------
// Module-scope helpers
// -----------------------

fn flush_text(children: &mut Vec<Value>, text_buf: &mut String) {
    if !text_buf.trim().is_empty() {
        children.push(json!({ "type": "text", "text": text_buf.clone() }));
    }
    text_buf.clear();
}

fn push_non_null(children: &mut Vec<Value>, value: Value) {
    if !value.is_null() {
        children.push(value);
    }
}

fn coalesce_children(tree: &DomTree, id: NodeId) -> Vec<Value> {
    let mut children: Vec<Value> = Vec::new();
    let mut text_buf = String::new();
    for child in tree.children(id) {
        if let Some(NodeData::Text(text)) = tree.data(child) {
            text_buf.push_str(text);
            continue;
        }
        flush_text(&mut children, &mut text_buf);
        let value = node_to_json(tree, child);
        push_non_null(&mut children, value);
    }
    flush_text(&mut children, &mut text_buf);
    children
}

fn node_to_json(tree: &DomTree, id: NodeId) -> Value {
    match tree.data(id) {
        Some(NodeData::Document) => {
            json!({ "type": "document", "children": coalesce_children(tree, id) })
        }
        Some(NodeData::Element(data)) => {
            // Sort attributes by key for determinism
            let mut pairs: Vec<(String, String)> = data
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            let mut attrs_obj = Map::new();
            for (key, value) in pairs {
                attrs_obj.insert(key, Value::String(value));
            }
            json!({
                "type": "element",
                "tag": data.tag_name.to_lowercase(),
                "attrs": Value::Object(attrs_obj),
                "children": coalesce_children(tree, id),
            })
        }
        Some(NodeData::Text(text)) => {
            if text.trim().is_empty() {
                Value::Null
            } else {
                json!({ "type": "text", "text": text })
            }
        }
        Some(NodeData::Comment(_)) | None => Value::Null,
    }
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

impl fmt::Debug for DomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            Ok(())
        }

        fn write_attrs(
            f: &mut fmt::Formatter<'_>,
            attributes: &std::collections::HashMap<String, String>,
        ) -> fmt::Result {
            let mut pairs: Vec<(&String, &String)> = attributes.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));
            for (key, value) in pairs {
                write!(f, " {}=\"{}\"", key, escape_text(value))?;
            }
            Ok(())
        }

        fn fmt_node(
            tree: &DomTree,
            id: NodeId,
            f: &mut fmt::Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            match tree.data(id) {
                Some(NodeData::Document) => {
                    write_indent(f, depth)?;
                    writeln!(f, "#document")?;
                    for child in tree.children(id) {
                        fmt_node(tree, child, f, depth + 1)?;
                    }
                }
                Some(NodeData::Element(data)) => {
                    write_indent(f, depth)?;
                    write!(f, "<{}", data.tag_name.to_lowercase())?;
                    write_attrs(f, &data.attributes)?;
                    writeln!(f, ">")?;
                    for child in tree.children(id) {
                        fmt_node(tree, child, f, depth + 1)?;
                    }
                    write_indent(f, depth)?;
                    writeln!(f, "</{}>", data.tag_name.to_lowercase())?;
                }
                Some(NodeData::Text(text)) => {
                    // Skip pure-whitespace text nodes for cleaner output
                    if text.chars().all(char::is_whitespace) {
                        return Ok(());
                    }
                    write_indent(f, depth)?;
                    writeln!(f, "\"{}\"", escape_text(text))?;
                }
                Some(NodeData::Comment(_)) | None => {}
            }
            Ok(())
        }

        fmt_node(self, self.document(), f, 0)
    }
}

impl DomTree {
    /// Build a deterministic JSON representation of the tree.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "div", "attrs": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.document())
    }

    /// Pretty JSON string for snapshots and test comparisons.
    pub fn to_json_string(&self) -> String {
        match serde_json::to_string_pretty(&self.to_json_value()) {
            Ok(text) => text,
            Err(_) => String::from("{}"),
        }
    }

    /// Serialize the subtree rooted at `node` back to HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        fn escape_html(raw: &str, out: &mut String) {
            for ch in raw.chars() {
                match ch {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    '"' => out.push_str("&quot;"),
                    _ => out.push(ch),
                }
            }
        }

        fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
            match tree.data(id) {
                Some(NodeData::Document) => {
                    for child in tree.children(id) {
                        write_node(tree, child, out);
                    }
                }
                Some(NodeData::Element(data)) => {
                    let tag = data.tag_name.to_lowercase();
                    out.push('<');
                    out.push_str(&tag);
                    let mut pairs: Vec<(&String, &String)> = data.attributes.iter().collect();
                    pairs.sort_by(|a, b| a.0.cmp(b.0));
                    for (key, value) in pairs {
                        out.push(' ');
                        out.push_str(key);
                        out.push_str("=\"");
                        escape_html(value, out);
                        out.push('"');
                    }
                    out.push('>');
                    for child in tree.children(id) {
                        write_node(tree, child, out);
                    }
                    out.push_str("</");
                    out.push_str(&tag);
                    out.push('>');
                }
                Some(NodeData::Text(text)) => escape_html(text, out),
                Some(NodeData::Comment(_)) | None => {}
            }
        }

        let mut out = String::new();
        write_node(self, node, &mut out);
        out
    }
}
