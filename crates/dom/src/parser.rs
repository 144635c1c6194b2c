//! HTML parsing into the arena tree.
//!
//! A `TreeSink` implementation builds the [`DomTree`] directly while
//! html5ever drives the parse. Fragments arrive as plain authored markup, so
//! the parser wraps them in the usual `html`/`head`/`body` scaffolding; use
//! [`crate::query`] helpers to reach the body content.

use crate::tree::{DomTree, ElementData, NodeData, NodeId};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, ExpandedName, ParseOpts, QualName};
use std::borrow::Cow;
use std::cell::RefCell;
use tendril::StrTendril;

/// Parse a complete HTML document (or a bare fragment, which html5ever wraps
/// in a document) into a [`DomTree`].
pub fn parse_document(html: &str) -> DomTree {
    use html5ever::tendril::TendrilSink as _;
    let sink = DomSink::new();
    html5ever::parse_document(sink, ParseOpts::default()).one(html)
}

/// Builds a [`DomTree`] while implementing `TreeSink` for html5ever.
pub struct DomSink {
    tree: RefCell<DomTree>,
    document: NodeId,
    // Static atoms for elem_name
    empty_ns: &'static html5ever::Namespace,
    empty_local: &'static html5ever::LocalName,
}

impl DomSink {
    pub fn new() -> Self {
        use html5ever::{local_name, namespace_url};
        static EMPTY_NS: html5ever::Namespace = namespace_url!("");
        static EMPTY_LOCAL: html5ever::LocalName = local_name!("");

        let tree = DomTree::new();
        let document = tree.document();
        Self {
            tree: RefCell::new(tree),
            document,
            empty_ns: &EMPTY_NS,
            empty_local: &EMPTY_LOCAL,
        }
    }

    fn append_text(&self, parent: NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        // Coalesce with a trailing text node so authored runs stay whole.
        if let Some(last) = tree.children(parent).last().copied()
            && let Some(NodeData::Text(existing)) = tree.data_mut(last)
        {
            existing.push_str(text);
            return;
        }
        let node = tree.create_text(text);
        tree.append(parent, node);
    }
}

impl Default for DomSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSink for DomSink {
    type Handle = NodeId;
    type Output = DomTree;
    type ElemName<'a> = ExpandedName<'a>;

    fn finish(self) -> DomTree {
        self.tree.into_inner()
    }

    fn parse_error(&self, _msg: Cow<'static, str>) {
        // Authored content is never schema-validated; parse errors are fine.
    }

    fn get_document(&self) -> NodeId {
        self.document
    }

    fn elem_name<'a>(&'a self, _target: &'a NodeId) -> ExpandedName<'a> {
        // Return empty expanded name - not used in our implementation
        ExpandedName {
            ns: self.empty_ns,
            local: self.empty_local,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> NodeId {
        let mut elem_data = ElementData::new(name.local.to_string());
        for attr in attrs {
            elem_data.set_attribute(attr.name.local.to_string(), attr.value.to_string());
        }
        self.tree.borrow_mut().create_element_from(elem_data)
    }

    fn create_comment(&self, text: StrTendril) -> NodeId {
        self.tree.borrow_mut().create_comment(&text)
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> NodeId {
        // Processing instructions - create as comment
        self.tree.borrow_mut().create_comment("")
    }

    fn append(&self, parent: &NodeId, child: NodeOrText<NodeId>) {
        match child {
            NodeOrText::AppendNode(node) => {
                self.tree.borrow_mut().append(*parent, node);
            }
            NodeOrText::AppendText(text) => {
                self.append_text(*parent, &text);
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &NodeId,
        _prev_element: &NodeId,
        child: NodeOrText<NodeId>,
    ) {
        self.append(element, child);
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Ignore doctype
    }

    fn get_template_contents(&self, target: &NodeId) -> NodeId {
        *target
    }

    fn same_node(&self, x: &NodeId, y: &NodeId) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {
        // Ignore quirks mode
    }

    fn append_before_sibling(&self, sibling: &NodeId, new_node: NodeOrText<NodeId>) {
        let mut tree = self.tree.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => tree.insert_before(*sibling, node),
            NodeOrText::AppendText(text) => {
                let node = tree.create_text(&text);
                tree.insert_before(*sibling, node);
            }
        }
    }

    fn add_attrs_if_missing(&self, target: &NodeId, attrs: Vec<Attribute>) {
        let mut tree = self.tree.borrow_mut();
        if let Some(data) = tree.element_mut(*target) {
            for attr in attrs {
                let name = attr.name.local.to_string();
                data.attributes
                    .entry(name)
                    .or_insert_with(|| attr.value.to_string());
            }
        }
    }

    fn remove_from_parent(&self, target: &NodeId) {
        self.tree.borrow_mut().detach(*target);
    }

    fn reparent_children(&self, node: &NodeId, new_parent: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        for child in tree.children(*node) {
            tree.append(*new_parent, child);
        }
    }
}
