//! Markup tree produced by the tern HTML parser.
//!
//! This crate provides an arena-based node tree loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), trimmed to what a
//! parse/serialize pipeline needs: four content node kinds plus a document
//! container, parent/child/sibling links, and ordered attributes.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. The parent link is an upward relation only; ownership always flows
//! downward from [`NodeId::ROOT`], so trees stay acyclic.
//!
//! Unlike a general DOM, attributes are an *ordered sequence*, not a map:
//! source order, duplicate names, and exact casing are all significant to the
//! serializer and are preserved.

use strum_macros::Display;

/// A type-safe index into the node arena.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document container node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "An object that participates in a tree has a parent, which is either
/// null or an object", and "an associated list of children".
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub kind: NodeKind,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// Upward relation, populated when the node is appended to a parent.
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    /// Returns true for the document container node.
    #[must_use]
    pub const fn is_document(&self) -> bool {
        self.kind.is_document()
    }

    /// Returns true for text nodes.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        self.kind.is_text()
    }

    /// Returns true for comment nodes.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Returns true for CDATA section nodes.
    #[must_use]
    pub const fn is_cdata(&self) -> bool {
        self.kind.is_cdata()
    }

    /// Returns true for element nodes.
    #[must_use]
    pub const fn is_element(&self) -> bool {
        self.kind.is_element()
    }
}

/// The node kinds the parser can produce.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    ///
    /// The arena's container node at [`NodeId::ROOT`]. Fragment parses hang
    /// their top-level nodes directly off it.
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    ///
    /// Parsed text runs never contain `<`; the two exceptions are the
    /// normalized doctype text node (`<!DOCTYPE html>`) at document level and
    /// the single raw-text child of `script`/`style`/`textarea`/`title`.
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    ///
    /// The data is the exact bytes between `<!--` and `-->`.
    Comment(String),
    /// [§ 4.8 Interface CDATASection](https://dom.spec.whatwg.org/#interface-cdatasection)
    ///
    /// Only valid beneath a foreign (SVG/MathML) subtree.
    Cdata(String),
}

impl NodeKind {
    /// Returns true for the document container node.
    #[must_use]
    pub const fn is_document(&self) -> bool {
        matches!(self, Self::Document)
    }

    /// Returns true for text nodes.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns true for comment nodes.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Returns true for CDATA section nodes.
    #[must_use]
    pub const fn is_cdata(&self) -> bool {
        matches!(self, Self::Cdata(_))
    }

    /// Returns true for element nodes.
    #[must_use]
    pub const fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }
}

/// How an element's content is parsed and serialized.
///
/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
///
/// "There are six different kinds of elements: void elements, the template
/// element, raw text elements, escapable raw text elements, foreign
/// elements, and normal elements."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ElementKind {
    /// "Void elements: area, base, br, col, embed, hr, img, input, link,
    /// meta, source, track, wbr": no content, no end tag.
    Void,
    /// "The template element": parsed like a normal element, but
    /// distinguished for declarative shadow root detection.
    Template,
    /// "Raw text elements: script, style": text until the matching end tag,
    /// never child markup.
    RawText,
    /// "Escapable raw text elements: textarea, title": same content model
    /// as raw text here, since character references are kept verbatim.
    EscapableRawText,
    /// "Foreign elements: elements from the MathML namespace and the SVG
    /// namespace": casing preserved, CDATA permitted, self-closing allowed.
    Foreign,
    /// "Normal elements: all other allowed HTML elements."
    Normal,
}

/// An attribute on an element.
///
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
/// "a list of attributes, each of which has a name and a value"
///
/// An attribute parsed without a value (`<input disabled>`) carries the
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name": casing preserved exactly, including
    /// colon-prefixed forms like `xml:lang` or `on:click`.
    pub name: String,
    /// "and a value": the bytes from the source, no entity decoding.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element),
/// elements have a local name and an attribute list. The attribute list is
/// kept as an ordered `Vec`; duplicate names are allowed and retained in
/// source order, which a map representation would destroy.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name". Lowercased for HTML-namespace elements,
    /// verbatim inside foreign (SVG/MathML) subtrees.
    pub tag_name: String,
    /// Content-model classification assigned at parse time.
    pub kind: ElementKind,
    /// Ordered attribute list.
    pub attributes: Vec<Attribute>,
    /// Whether the start tag ended in `/>` (or the element is void, which
    /// implies it). Self-closing elements never have children.
    pub self_closing: bool,
}

impl ElementData {
    /// Returns the value of the first attribute with the given name, if any.
    ///
    /// Duplicates are legal in the tree; lookups resolve to the earliest
    /// occurrence, mirroring how browsers treat repeated attributes.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Returns true if any attribute has the given name.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }
}

/// Arena-based node tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// All nodes live in a contiguous vector indexed by [`NodeId`]; the document
/// container node occupies index 0 from construction.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a new tree holding just the document container node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        Tree {
            nodes: vec![document],
        }
    }

    /// The document container node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes in the arena, document container included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True only for a tree that lost its document node, which cannot happen
    /// through this API.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before
    /// null."
    ///
    /// Appends `child` as the last child of `parent`, updating the parent
    /// link and both sibling links.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The first element child of the document container node.
    ///
    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    /// "The document element of a document is the element whose parent is
    /// that document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.get(id).is_some_and(Node::is_element))
            .copied()
    }

    /// Concatenated text of a subtree, in document order.
    ///
    /// Text and CDATA data both contribute; comments do not.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        match &node.kind {
            NodeKind::Text(data) | NodeKind::Cdata(data) => out.push_str(data),
            NodeKind::Comment(_) => {}
            NodeKind::Document | NodeKind::Element(_) => {
                for &child in &node.children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Validates the structural invariants a correct parse must uphold.
    ///
    /// Checked:
    /// - void and self-closing elements have no children;
    /// - raw-text kinds have at most one child, and it is a text node;
    /// - CDATA sections have a foreign-kind ancestor element;
    /// - text under an element subtree contains no `<`, except the single
    ///   raw-text child.
    ///
    /// Returns true when the tree is well-formed. Parse entry points wrap
    /// this in `debug_assert!`; a false return indicates a parser bug, never
    /// bad input.
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        self.nodes.iter().enumerate().all(|(index, node)| {
            let id = NodeId(index);
            match &node.kind {
                NodeKind::Element(data) => self.check_element(node, data),
                NodeKind::Cdata(_) => self.has_foreign_ancestor(id),
                NodeKind::Text(text) => self.check_text(id, text),
                NodeKind::Document | NodeKind::Comment(_) => true,
            }
        })
    }

    fn check_element(&self, node: &Node, data: &ElementData) -> bool {
        match data.kind {
            ElementKind::Void => node.children.is_empty(),
            ElementKind::RawText | ElementKind::EscapableRawText => {
                node.children.len() <= 1
                    && node
                        .children
                        .first()
                        .is_none_or(|&child| self.get(child).is_some_and(Node::is_text))
            }
            _ => !data.self_closing || node.children.is_empty(),
        }
    }

    fn check_text(&self, id: NodeId, text: &str) -> bool {
        if !text.contains('<') {
            return true;
        }
        // Raw-text children keep markup-looking bytes; document-level text
        // nodes cover the doctype and are exempt as well.
        match self.parent(id).and_then(|p| self.as_element(p)) {
            Some(parent) => matches!(
                parent.kind,
                ElementKind::RawText | ElementKind::EscapableRawText
            ),
            None => true,
        }
    }

    fn has_foreign_ancestor(&self, id: NodeId) -> bool {
        self.ancestors(id)
            .any(|a| self.as_element(a).is_some_and(|e| e.kind == ElementKind::Foreign))
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node, nearest first.
pub struct AncestorIterator<'a> {
    tree: &'a Tree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
