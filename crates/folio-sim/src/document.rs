#![forbid(unsafe_code)]

//! In-memory element tree.
//!
//! Just enough DOM for the page controller: tags, classes, attributes, inline
//! styles, text, and a fixed layout box (`top`, `height`) per element. Nodes
//! live in an arena and are addressed by [`NodeId`]. Elements created but
//! never appended stay detached and are invisible to queries.

use std::collections::BTreeMap;

use folio_core::Selector;

/// Arena index of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    top: f64,
    height: f64,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<NodeData>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A document holding only `<body>`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                tag: "body".into(),
                ..NodeData::default()
            }],
        }
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: &str) -> NodeId {
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Create `<tag class="...">` and append it to `parent`.
    pub fn element(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let node = self.create(tag);
        for class in classes {
            self.add_class(node, class);
        }
        self.append(parent, node);
        node
    }

    /// Append `child` to `parent`, moving it if already attached elsewhere.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    #[must_use]
    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.0].classes
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.0].classes.push(class.to_owned());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    /// Inline style by CSS property name.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.nodes[node.0]
            .styles
            .insert(property.to_owned(), value.to_owned());
    }

    /// `textContent`: own text followed by every descendant's, in order.
    #[must_use]
    pub fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let data = &self.nodes[node.0];
        out.push_str(&data.text);
        for child in &data.children {
            self.collect_text(*child, out);
        }
    }

    /// Replace all content with `text`, detaching the children.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.nodes[node.0].text = text.to_owned();
    }

    /// Fix the element's layout box.
    pub fn set_layout(&mut self, node: NodeId, top: f64, height: f64) {
        let data = &mut self.nodes[node.0];
        data.top = top;
        data.height = height;
    }

    #[must_use]
    pub fn top(&self, node: NodeId) -> f64 {
        self.nodes[node.0].top
    }

    #[must_use]
    pub fn height(&self, node: NodeId) -> f64 {
        self.nodes[node.0].height
    }

    /// `true` when `node` is `ancestor` or below it.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// `node` followed by its ancestors up to the root it hangs from.
    #[must_use]
    pub fn path(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            path.push(current);
            cursor = self.parent(current);
        }
        path
    }

    /// Attached elements in document (pre-)order, starting at `<body>`.
    #[must_use]
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.body()];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    #[must_use]
    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        match selector {
            Selector::Class(class) => self.has_class(node, class),
            Selector::Id(id) => self.attribute(node, "id") == Some(id.as_str()),
            Selector::TagWithAttr { tag, attr } => {
                self.tag(node).eq_ignore_ascii_case(tag) && self.attribute(node, attr).is_some()
            }
            Selector::AttrPrefix { tag, attr, prefix } => {
                self.tag(node).eq_ignore_ascii_case(tag)
                    && self
                        .attribute(node, attr)
                        .is_some_and(|value| value.starts_with(prefix.as_str()))
            }
            Selector::ClassWithAttr { class, attr, value } => {
                self.has_class(node, class) && self.attribute(node, attr) == Some(value.as_str())
            }
            Selector::Descendant(ancestor, descendant) => {
                self.matches(node, descendant)
                    && self
                        .path(node)
                        .into_iter()
                        .skip(1)
                        .any(|up| self.matches(up, ancestor))
            }
        }
    }

    #[must_use]
    pub fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|node| self.matches(*node, selector))
    }

    #[must_use]
    pub fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|node| self.matches(*node, selector))
            .collect()
    }
}
