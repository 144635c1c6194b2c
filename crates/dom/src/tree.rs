//! DOM tree structure and node data.

use indextree::Arena;
use std::collections::HashMap;

pub use indextree::NodeId;

/// Data stored for each DOM node.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Data for an element node.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag_name: String,
    pub attributes: HashMap<String, String>,
}

impl ElementData {
    pub fn new(tag_name: String) -> Self {
        Self {
            tag_name,
            attributes: HashMap::new(),
        }
    }

    pub fn set_attribute(&mut self, name: String, value: String) {
        self.attributes.insert(name, value);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the space-separated `class` attribute contains `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// Append `class_name` to the `class` attribute unless already present.
    pub fn add_class(&mut self, class_name: &str) {
        if self.has_class(class_name) {
            return;
        }
        let classes = self.attributes.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class_name);
    }

    pub fn remove_class(&mut self, class_name: &str) {
        let Some(classes) = self.attributes.get("class") else {
            return;
        };
        let remaining = classes
            .split_whitespace()
            .filter(|c| *c != class_name)
            .collect::<Vec<_>>()
            .join(" ");
        self.attributes.insert("class".to_string(), remaining);
    }

    /// The first class name, which identifies a content block's kind.
    pub fn first_class(&self) -> Option<&str> {
        self.attribute("class")
            .and_then(|classes| classes.split_whitespace().next())
    }
}

/// DOM tree storing node data in an arena, rooted at a document node.
pub struct DomTree {
    arena: Arena<NodeData>,
    document: NodeId,
}

impl DomTree {
    /// Create a new tree containing only a document node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let document = arena.new_node(NodeData::Document);
        Self { arena, document }
    }

    pub(crate) fn from_parts(arena: Arena<NodeData>, document: NodeId) -> Self {
        Self { arena, document }
    }

    pub fn document(&self) -> NodeId {
        self.document
    }

    pub fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.arena.get(node).map(indextree::Node::get)
    }

    pub fn data_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.arena.get_mut(node).map(indextree::Node::get_mut)
    }

    /// Element data for `node`, if it is an element.
    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.data(node) {
            Some(NodeData::Element(data)) => Some(data),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match self.data_mut(node) {
            Some(NodeData::Element(data)) => Some(data),
            _ => None,
        }
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|data| data.tag_name.as_str())
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    // ----- construction -----

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena
            .new_node(NodeData::Element(ElementData::new(tag.to_string())))
    }

    pub fn create_element_from(&mut self, data: ElementData) -> NodeId {
        self.arena.new_node(NodeData::Element(data))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.arena.new_node(NodeData::Comment(text.to_string()))
    }

    // ----- structure -----

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        parent.append(child, &mut self.arena);
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) {
        parent.prepend(child, &mut self.arena);
    }

    /// Insert `new_node` immediately before `reference` under the same parent.
    pub fn insert_before(&mut self, reference: NodeId, new_node: NodeId) {
        reference.insert_before(new_node, &mut self.arena);
    }

    /// Insert `new_node` immediately after `reference` under the same parent.
    pub fn insert_after(&mut self, reference: NodeId, new_node: NodeId) {
        reference.insert_after(new_node, &mut self.arena);
    }

    /// Remove `node` (and its subtree) from its parent. The nodes stay in the
    /// arena and can be re-attached later.
    pub fn detach(&mut self, node: NodeId) {
        node.detach(&mut self.arena);
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(indextree::Node::parent)
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(indextree::Node::next_sibling)
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.arena
            .get(node)
            .and_then(indextree::Node::previous_sibling)
    }

    /// Children of `node` in document order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        node.children(&self.arena).collect()
    }

    /// Element children of `node` in document order.
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        node.children(&self.arena)
            .filter(|child| self.is_element(*child))
            .collect()
    }

    /// All nodes of the subtree rooted at `node` in preorder, excluding
    /// `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        node.descendants(&self.arena).skip(1).collect()
    }

    /// Concatenated text of all text nodes under `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        for id in node.descendants(&self.arena) {
            if let Some(NodeData::Text(chunk)) = self.data(id) {
                text.push_str(chunk);
            }
        }
        text
    }

    // ----- copying -----

    /// Deep-copy the subtree rooted at `node` within this tree. The copy is
    /// detached; attach it wherever needed.
    pub fn clone_subtree(&mut self, node: NodeId) -> NodeId {
        let data = self
            .data(node)
            .cloned()
            .unwrap_or(NodeData::Text(String::new()));
        let copy = self.arena.new_node(data);
        for child in self.children(node) {
            let child_copy = self.clone_subtree(child);
            self.append(copy, child_copy);
        }
        copy
    }

    /// Deep-copy a subtree from another tree into this one. Used to attach a
    /// clone of a cached fragment without mutating the cached original.
    pub fn import(&mut self, source: &Self, source_node: NodeId) -> NodeId {
        let data = source
            .data(source_node)
            .cloned()
            .unwrap_or(NodeData::Text(String::new()));
        let copy = self.arena.new_node(data);
        for child in source.children(source_node) {
            let child_copy = self.import(source, child);
            self.append(copy, child_copy);
        }
        copy
    }

    // ----- attribute and class helpers -----

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|data| data.attribute(name))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.element_mut(node) {
            data.set_attribute(name.to_string(), value.to_string());
        }
    }

    pub fn has_class(&self, node: NodeId, class_name: &str) -> bool {
        self.element(node)
            .is_some_and(|data| data.has_class(class_name))
    }

    pub fn add_class(&mut self, node: NodeId, class_name: &str) {
        if let Some(data) = self.element_mut(node) {
            data.add_class(class_name);
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class_name: &str) {
        if let Some(data) = self.element_mut(node) {
            data.remove_class(class_name);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
