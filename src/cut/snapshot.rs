//! Tree snapshots - owned, serializable value trees
//!
//! A snapshot captures the structure of a subtree (tags, attributes, text, children)
//! independently of the tree that produced it. Two subtrees are structurally equal
//! exactly when their snapshots compare equal, which is what tests and the treeviz
//! renderer build on.
//!
//! Capture and materialization both walk with explicit stacks, so arbitrarily deep
//! trees are fine.

use crate::cut::dom::{Attribute, NodeData, TreeRead, TreeWrite};
use serde::{Deserialize, Serialize};

/// A snapshot of a node and all its descendants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeSnapshot {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<Attribute>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<TreeSnapshot>,
    },
    Text {
        value: String,
    },
}

impl TreeSnapshot {
    /// An element with no attributes and no children
    pub fn element(tag: impl Into<String>) -> Self {
        TreeSnapshot::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        TreeSnapshot::Text {
            value: value.into(),
        }
    }

    /// Add an attribute. Ignored on text snapshots.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let TreeSnapshot::Element { attributes, .. } = &mut self {
            attributes.push(Attribute::new(name, value));
        }
        self
    }

    /// Add a child snapshot. Ignored on text snapshots.
    pub fn with_child(self, child: TreeSnapshot) -> Self {
        self.with_children([child])
    }

    /// Add multiple children. Ignored on text snapshots.
    pub fn with_children(mut self, new_children: impl IntoIterator<Item = TreeSnapshot>) -> Self {
        if let TreeSnapshot::Element { children, .. } = &mut self {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            TreeSnapshot::Element { tag, .. } => Some(tag),
            TreeSnapshot::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[TreeSnapshot] {
        match self {
            TreeSnapshot::Element { children, .. } => children,
            TreeSnapshot::Text { .. } => &[],
        }
    }

    /// Number of nodes in this snapshot, itself included
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(current) = pending.pop() {
            count += 1;
            pending.extend(current.children());
        }
        count
    }

    /// Borrowed payload view, children excluded
    pub fn as_data(&self) -> NodeData<'_> {
        match self {
            TreeSnapshot::Element {
                tag, attributes, ..
            } => NodeData::Element { tag, attributes },
            TreeSnapshot::Text { value } => NodeData::Text(value),
        }
    }

    fn shallow(data: NodeData<'_>) -> Self {
        match data {
            NodeData::Element { tag, attributes } => TreeSnapshot::Element {
                tag: tag.to_string(),
                attributes: attributes.to_vec(),
                children: Vec::new(),
            },
            NodeData::Text(value) => TreeSnapshot::text(value),
        }
    }
}

struct Frame<N> {
    node: N,
    next_child: usize,
    children: Vec<TreeSnapshot>,
}

/// Capture the subtree rooted at `node`
pub fn snapshot<T>(tree: &T, node: T::Node) -> TreeSnapshot
where
    T: TreeRead + ?Sized,
{
    let mut stack = vec![Frame {
        node,
        next_child: 0,
        children: Vec::new(),
    }];
    let mut finished = None;

    while let Some(frame) = stack.last_mut() {
        if let Some(&child) = tree.children(frame.node).get(frame.next_child) {
            frame.next_child += 1;
            stack.push(Frame {
                node: child,
                next_child: 0,
                children: Vec::new(),
            });
            continue;
        }
        if let Some(done) = stack.pop() {
            let captured = TreeSnapshot::shallow(tree.data(done.node)).with_children(done.children);
            match stack.last_mut() {
                Some(parent) => parent.children.push(captured),
                None => finished = Some(captured),
            }
        }
    }

    finished.unwrap_or_else(|| TreeSnapshot::shallow(tree.data(node)))
}

/// Create the nodes of `snapshot` in `tree` and return the new, detached root
pub fn materialize<W>(tree: &mut W, snapshot: &TreeSnapshot) -> W::Node
where
    W: TreeWrite + ?Sized,
{
    let root = tree.create(snapshot.as_data());
    let mut pending = vec![(snapshot, root)];
    while let Some((current, node)) = pending.pop() {
        for child in current.children() {
            let copy = tree.create(child.as_data());
            tree.append_child(node, copy);
            pending.push((child, copy));
        }
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::dom::Document;

    fn sample() -> TreeSnapshot {
        TreeSnapshot::element("div")
            .with_child(TreeSnapshot::element("b").with_child(TreeSnapshot::text("Be bold!")))
            .with_child(
                TreeSnapshot::element("ol")
                    .with_attribute("start", "3")
                    .with_child(TreeSnapshot::element("li").with_child(TreeSnapshot::text("x"))),
            )
    }

    #[test]
    fn test_materialize_then_capture() {
        let mut doc = Document::new();
        let root = doc.insert(&sample());

        assert_eq!(doc.snapshot(root), sample());
        assert_eq!(doc.child_count(root), 2);
        assert_eq!(doc.len(), 6);
    }

    #[test]
    fn test_capture_keeps_child_order() {
        let mut doc = Document::new();
        let root = doc.element("p");
        for word in ["one", "two", "three"] {
            let node = doc.text(word);
            doc.append(root, node);
        }
        assert_eq!(
            doc.snapshot(root),
            TreeSnapshot::element("p").with_children([
                TreeSnapshot::text("one"),
                TreeSnapshot::text("two"),
                TreeSnapshot::text("three"),
            ])
        );
    }

    #[test]
    fn test_capture_deep_tree() {
        let mut doc = Document::new();
        let root = doc.element("div");
        let mut current = root;
        for _ in 0..2_000 {
            let child = doc.element("div");
            current = doc.append(current, child);
        }
        assert_eq!(doc.snapshot(root).node_count(), 2_001);
    }

    #[test]
    fn test_text_ignores_builders() {
        let text = TreeSnapshot::text("x")
            .with_attribute("a", "b")
            .with_child(TreeSnapshot::element("b"));
        assert_eq!(text, TreeSnapshot::text("x"));
        assert_eq!(text.node_count(), 1);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(TreeSnapshot::element("b").with_child(TreeSnapshot::text("hi")))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "element",
                "tag": "b",
                "children": [{ "type": "text", "value": "hi" }]
            })
        );
    }
}
