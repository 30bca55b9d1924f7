//! Fluent assertion API for trees
//!
//!     Checking a cut result by walking it by hand takes a lot of boilerplate and tends to
//!     stop at counts. This module lets a test state what it expects of any node, its
//!     children and their content, and report failures with the address of the node
//!     that did not match.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use treecut::cut::testing::assert_tree;
//!
//!     assert_tree(&fragment.tree, fragment.root)
//!         .tag("div")
//!         .child_count(2)
//!         .child(0, |b| {
//!             b.tag("b").text_content("Be bold!");
//!         })
//!         .child(1, |i| {
//!             i.tag("i").child(0, |text| {
//!                 text.text("Think different");
//!             });
//!         });
//!     ```

use crate::cut::dom::TreeRead;
use crate::cut::traversal::text_content;

/// Create an assertion builder for `node`
pub fn assert_tree<T>(tree: &T, node: T::Node) -> NodeAssertion<'_, T>
where
    T: TreeRead + ?Sized,
{
    NodeAssertion {
        tree,
        node,
        context: "/".to_string(),
    }
}

pub struct NodeAssertion<'a, T: TreeRead + ?Sized> {
    tree: &'a T,
    node: T::Node,
    context: String,
}

impl<'a, T: TreeRead + ?Sized> NodeAssertion<'a, T> {
    /// Assert this is an element with the given tag
    pub fn tag(self, expected: &str) -> Self {
        match self.tree.tag_name(self.node) {
            Some(actual) => assert_eq!(
                actual, expected,
                "{}: Expected <{}>, found <{}>",
                self.context, expected, actual
            ),
            None => panic!("{}: Expected <{}>, found a text node", self.context, expected),
        }
        self
    }

    /// Assert this is a text node with exactly the given value
    pub fn text(self, expected: &str) -> Self {
        match self.tree.text_value(self.node) {
            Some(actual) => assert_eq!(
                actual, expected,
                "{}: Expected text {:?}, found {:?}",
                self.context, expected, actual
            ),
            None => panic!(
                "{}: Expected text {:?}, found <{}>",
                self.context,
                expected,
                self.tree.tag_name(self.node).unwrap_or_default()
            ),
        }
        self
    }

    /// Assert the concatenated text of this subtree
    pub fn text_content(self, expected: &str) -> Self {
        let actual = text_content(self.tree, self.node);
        assert_eq!(
            actual, expected,
            "{}: Expected text content {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn attribute(self, name: &str, expected: &str) -> Self {
        let actual = self.tree.attribute(self.node, name);
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected attribute {}={:?}, found {:?}",
            self.context,
            name,
            expected,
            actual
        );
        self
    }

    pub fn no_attribute(self, name: &str) -> Self {
        let actual = self.tree.attribute(self.node, name);
        assert!(
            actual.is_none(),
            "{}: Expected no attribute {}, found {:?}",
            self.context,
            name,
            actual
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.tree.child_count(self.node);
        assert_eq!(
            actual, expected,
            "{}: Expected {} children, found {}",
            self.context, expected, actual
        );
        self
    }

    /// Assert this node has no children
    pub fn leaf(self) -> Self {
        self.child_count(0)
    }

    /// Assert on the child at a 0-based index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a, T>),
    {
        let count = self.tree.child_count(self.node);
        let Some(child) = self.tree.child_at(self.node, index) else {
            panic!(
                "{}: Child index {} out of bounds (node has {} children)",
                self.context, index, count
            );
        };
        let separator = if self.context.ends_with('/') { "" } else { "/" };
        assertion(NodeAssertion {
            tree: self.tree,
            node: child,
            context: format!("{}{}{}", self.context, separator, index + 1),
        });
        self
    }
}
