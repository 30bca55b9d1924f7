//! Pagination on top of progressive cloning
//!
//! A [`Paginator`] splits a root's subtree into pages. Every page is a fresh tree whose
//! root is a shallow copy of the source root; each pass runs [`clone_progressive`]
//! until the [`PageBudget`] is spent and the next pass resumes right after the paused
//! node. Each source node lands on exactly one page. Ancestor shells rebuilt to give a
//! mid-tree page its nesting are structure only and do not count against the budget.

use crate::cut::address::Address;
use crate::cut::config::PagingConfig;
use crate::cut::dom::{Document, Fragment, TreeRead, TreeWrite};
use crate::cut::error::CutError;
use crate::cut::progressive::{clone_progressive, ResumeFrom};
use std::marker::PhantomData;
use tracing::debug;

/// How much a single page may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBudget {
    /// Copied nodes per page. 0 is treated as 1 so every page makes progress.
    pub max_nodes: usize,
    /// Characters of copied text per page, `None` for no limit
    pub max_text_chars: Option<usize>,
}

impl PageBudget {
    pub fn nodes(max_nodes: usize) -> Self {
        Self {
            max_nodes,
            max_text_chars: None,
        }
    }

    pub fn with_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = Some(max_text_chars);
        self
    }

    fn is_spent(&self, nodes: usize, text_chars: usize) -> bool {
        nodes >= self.max_nodes.max(1)
            || self
                .max_text_chars
                .is_some_and(|limit| text_chars >= limit)
    }
}

impl From<&PagingConfig> for PageBudget {
    fn from(config: &PagingConfig) -> Self {
        Self {
            max_nodes: config.max_nodes,
            max_text_chars: (config.max_text_chars > 0).then_some(config.max_text_chars),
        }
    }
}

impl Default for PageBudget {
    fn default() -> Self {
        Self::from(&PagingConfig::default())
    }
}

/// One page of a paginated tree
#[derive(Debug, Clone)]
pub struct Page<T: TreeRead> {
    pub fragment: Fragment<T>,
    /// Address of the first node copied into this page
    pub start: Address,
    /// Address of the last node copied into this page
    pub end: Address,
    /// Source nodes copied, ancestor shells excluded
    pub nodes: usize,
    /// No page follows this one
    pub is_last: bool,
}

/// Iterator over the pages of a subtree
pub struct Paginator<'a, S: TreeRead + ?Sized, T> {
    source: &'a S,
    root: S::Node,
    budget: PageBudget,
    next: Option<ResumeFrom<S::Node>>,
    _target: PhantomData<fn() -> T>,
}

impl<'a, S, T> Paginator<'a, S, T>
where
    S: TreeRead + ?Sized,
    T: TreeWrite + Default,
{
    /// Paginate `root`'s subtree. A childless root yields no pages.
    pub fn new(source: &'a S, root: S::Node, budget: PageBudget) -> Self {
        let next = source
            .first_child(root)
            .map(|first| ResumeFrom::new(first, Address::from_positions(vec![1])));
        Self {
            source,
            root,
            budget,
            next,
            _target: PhantomData,
        }
    }
}

impl<S, T> Iterator for Paginator<'_, S, T>
where
    S: TreeRead + ?Sized,
    T: TreeWrite + Default,
{
    type Item = Result<Page<T>, CutError>;

    fn next(&mut self) -> Option<Self::Item> {
        let resume = self.next.take()?;
        let source = self.source;
        let budget = self.budget;
        let start = resume.address.clone();

        let mut tree = T::default();
        let page_root = tree.copy_shallow_from(source, self.root);
        let mut nodes = 0;
        let mut text_chars = 0;
        let mut end = start.clone();

        let paused = clone_progressive(
            source,
            self.root,
            &mut tree,
            page_root,
            |cursor| {
                nodes += 1;
                if let Some(text) = source.text_value(cursor.node) {
                    text_chars += text.chars().count();
                }
                end = cursor.address.clone();
                budget.is_spent(nodes, text_chars)
            },
            resume,
        );
        match paused {
            Ok(Some(cursor)) => self.next = cursor.successor(source, self.root),
            Ok(None) => {}
            Err(err) => return Some(Err(err)),
        }

        debug!(start = %start, end = %end, nodes, text_chars, "page emitted");
        Some(Ok(Page {
            fragment: Fragment::new(tree, page_root),
            start,
            end,
            nodes,
            is_last: self.next.is_none(),
        }))
    }
}

/// Paginate into [`Document`] pages
pub fn paginate<S>(source: &S, root: S::Node, budget: PageBudget) -> Paginator<'_, S, Document>
where
    S: TreeRead + ?Sized,
{
    Paginator::new(source, root, budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::dom::NodeId;
    use crate::cut::snapshot::TreeSnapshot;

    fn source() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.insert(
            &TreeSnapshot::element("div")
                .with_child(TreeSnapshot::element("b").with_child(TreeSnapshot::text("Be bold!")))
                .with_child(
                    TreeSnapshot::element("i").with_child(TreeSnapshot::text("Think different")),
                )
                .with_child(
                    TreeSnapshot::element("u").with_child(TreeSnapshot::text("But be productive")),
                ),
        );
        (doc, root)
    }

    #[test]
    fn test_pages_by_node_count() {
        let (doc, root) = source();
        let pages: Vec<_> = paginate(&doc, root, PageBudget::nodes(2))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].start.to_string(), "/2");
        assert_eq!(pages[1].end.to_string(), "/2/1");
        assert_eq!(
            pages[1].fragment.snapshot(),
            TreeSnapshot::element("div")
                .with_child(TreeSnapshot::element("i").with_child(TreeSnapshot::text("Think different")))
        );
        assert!(pages[2].is_last);
        assert!(!pages[0].is_last);
    }

    #[test]
    fn test_mid_element_page_gets_shell() {
        let (doc, root) = source();
        let pages: Vec<_> = paginate(&doc, root, PageBudget::nodes(3))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].start.to_string(), "/2/1");
        assert_eq!(pages[1].nodes, 3);
        assert_eq!(
            pages[1].fragment.snapshot(),
            TreeSnapshot::element("div")
                .with_child(TreeSnapshot::element("i").with_child(TreeSnapshot::text("Think different")))
                .with_child(
                    TreeSnapshot::element("u").with_child(TreeSnapshot::text("But be productive"))
                )
        );
    }

    #[test]
    fn test_pages_by_text() {
        let (doc, root) = source();
        let budget = PageBudget::nodes(100).with_text_chars(10);
        let pages: Vec<_> = paginate(&doc, root, budget)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].nodes, 4);
        assert_eq!(pages[1].fragment.tree.text_content(pages[1].fragment.root), "But be productive");
    }

    #[test]
    fn test_zero_budget_still_progresses() {
        let (doc, root) = source();
        let count = paginate(&doc, root, PageBudget::nodes(0)).count();
        assert_eq!(count, 6);
    }

    #[test]
    fn test_childless_root_has_no_pages() {
        let mut doc = Document::new();
        let root = doc.element("div");
        assert_eq!(paginate(&doc, root, PageBudget::default()).count(), 0);
    }

    #[test]
    fn test_budget_from_config() {
        let budget = PageBudget::from(&PagingConfig {
            max_nodes: 5,
            max_text_chars: 0,
        });
        assert_eq!(budget, PageBudget::nodes(5));
        assert_eq!(PageBudget::default().max_nodes, 64);
    }
}
