//! Arena-backed XML tree.
//!
//! Nodes live in a flat `Vec` owned by the document and are addressed by
//! [`NodeId`]. A node is created detached and becomes part of the tree once
//! appended to an element (or installed as the root).
//!
//! ```text
//! XmlDocument
//! └── root: <rss version="2.0">        NodeId(0)
//!     └── <channel>                    NodeId(1)
//!         ├── <title>                  NodeId(2)
//!         │   └── Text("My blog")      NodeId(3)
//!         └── ...
//! ```
//!
//! A `NodeId` is only meaningful for the document that produced it.

use crate::error::XmlError;

/// Handle to a node inside an [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        name: String,
        /// Insertion ordered; keys are unique.
        attributes: Vec<(String, String)>,
    },
    Text(String),
    CData(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Mutable XML document.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    version: String,
    encoding: String,
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::new("1.0", "utf-8")
    }
}

impl XmlDocument {
    pub fn new(version: impl Into<String>, encoding: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            encoding: encoding.into(),
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Document element, if one has been installed.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    // ========================================================================
    // Node creation
    // ========================================================================

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeKind::Element {
            name: name.into(),
            attributes: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text_node(&mut self, content: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(content.into()))
    }

    /// Create a detached CDATA section.
    pub fn create_cdata_section(&mut self, content: impl Into<String>) -> NodeId {
        self.push(NodeKind::CData(content.into()))
    }

    // ========================================================================
    // Tree mutation
    // ========================================================================

    /// Install `element` as the document element, replacing any previous one.
    pub fn set_root(&mut self, element: NodeId) -> Result<NodeId, XmlError> {
        self.ensure_element(element)?;
        self.detach(element);
        self.root = Some(element);
        Ok(element)
    }

    /// Append `child` as the last child of `parent`, moving it if it was
    /// already attached elsewhere. Returns `child`.
    ///
    /// Fails with [`XmlError::Hierarchy`] when `child` is `parent` or one of
    /// its ancestors; the tree is left untouched in that case.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, XmlError> {
        self.ensure_element(parent)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(XmlError::Hierarchy(describe(&self.nodes[child.0].kind)));
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(child)
    }

    /// Set an attribute, overwriting the value if the key already exists.
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), XmlError> {
        let (key, value) = (key.into(), value.into());
        match &mut self.nodes[element.0].kind {
            NodeKind::Element { attributes, .. } => {
                match attributes.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = value,
                    None => attributes.push((key, value)),
                }
                Ok(())
            }
            other => Err(XmlError::NotAnElement(describe(other))),
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
        if self.root == Some(node) {
            self.root = None;
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    fn ensure_element(&self, node: NodeId) -> Result<(), XmlError> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { .. } => Ok(()),
            other => Err(XmlError::NotAnElement(describe(other))),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Element name, `None` for text and CDATA nodes.
    pub fn name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Element children named `name`, in document order.
    pub fn child_elements<'a>(
        &'a self,
        node: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(node)
            .iter()
            .copied()
            .filter(move |c| self.name(*c) == Some(name))
    }

    /// Concatenated text and CDATA content of all descendants.
    pub fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(s) | NodeKind::CData(s) => out.push_str(s),
            NodeKind::Element { .. } => {
                for child in &self.nodes[node.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// All attached elements named `name`, in document order.
    pub fn elements_by_tag_name(&self, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        if let Some(root) = self.root {
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                if self.name(node) == Some(name) {
                    found.push(node);
                }
                stack.extend(self.children(node).iter().rev());
            }
        }
        found
    }
}

fn describe(kind: &NodeKind) -> String {
    match kind {
        NodeKind::Element { name, .. } => name.clone(),
        NodeKind::Text(_) => "#text".to_string(),
        NodeKind::CData(_) => "#cdata-section".to_string(),
    }
}
