//! Range extraction
//!
//! Most cases cut <div><b>Be bold!</b><i>Think different</i><u>But be productive</u></div>

use rstest::rstest;
use treecut::cut::testing::assert_tree;
use treecut::cut::{
    extract, Address, CutError, Document, ExtractOptions, NodeId, TreeRead, TreeSnapshot,
};

fn sample() -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.insert(
        &TreeSnapshot::element("div")
            .with_attribute("id", "root")
            .with_child(TreeSnapshot::element("b").with_child(TreeSnapshot::text("Be bold!")))
            .with_child(TreeSnapshot::element("i").with_child(TreeSnapshot::text("Think different")))
            .with_child(
                TreeSnapshot::element("u").with_child(TreeSnapshot::text("But be productive")),
            ),
    );
    (doc, root)
}

fn b() -> TreeSnapshot {
    TreeSnapshot::element("b").with_child(TreeSnapshot::text("Be bold!"))
}

fn i() -> TreeSnapshot {
    TreeSnapshot::element("i").with_child(TreeSnapshot::text("Think different"))
}

fn u() -> TreeSnapshot {
    TreeSnapshot::element("u").with_child(TreeSnapshot::text("But be productive"))
}

fn root_with(children: Vec<TreeSnapshot>) -> TreeSnapshot {
    TreeSnapshot::element("div")
        .with_attribute("id", "root")
        .with_children(children)
}

fn parse(address: &str) -> Address {
    address.parse().unwrap()
}

#[rstest]
#[case::from_to_the_end(Some("/2"), None, false, vec![i(), u()])]
#[case::to_excluded(Some("/1"), Some("/3"), false, vec![b(), i()])]
#[case::to_included(Some("/1"), Some("/3"), true, vec![b(), i(), TreeSnapshot::element("u")])]
#[case::to_text_included(None, Some("/2/1"), true, vec![b(), i()])]
#[case::to_text_excluded_drops_empty_parent(None, Some("/2/1"), false, vec![b()])]
#[case::everything(None, None, false, vec![b(), i(), u()])]
#[case::within_one_element(Some("/2"), Some("/2/1"), true, vec![i()])]
#[case::from_root_only(Some("/"), None, false, vec![b(), i(), u()])]
#[case::to_root_only(None, Some("/"), false, vec![b(), i(), u()])]
#[case::to_root_with_from(Some("/2"), Some("/"), false, vec![i(), u()])]
fn test_extract(
    #[case] from: Option<&str>,
    #[case] to: Option<&str>,
    #[case] inclusive: bool,
    #[case] expected: Vec<TreeSnapshot>,
) {
    let (doc, root) = sample();
    let mut options = ExtractOptions::new().inclusive(inclusive);
    options.from = from.map(parse);
    options.to = to.map(parse);

    let fragment = extract(&doc, root, &options).unwrap();

    assert_eq!(fragment.snapshot(), root_with(expected));
}

#[test]
fn test_empty_range_over_root_is_a_shallow_copy() {
    let (doc, root) = sample();
    let options = ExtractOptions::new()
        .from_address(Address::root())
        .to_address(Address::root());

    let fragment = extract(&doc, root, &options).unwrap();

    assert_tree(&fragment.tree, fragment.root)
        .tag("div")
        .attribute("id", "root")
        .leaf();
}

#[test]
fn test_full_extract_matches_a_full_clone() {
    let (doc, root) = sample();
    let fragment = extract(&doc, root, &ExtractOptions::default()).unwrap();
    assert_eq!(fragment.snapshot(), doc.snapshot(root));
}

#[test]
fn test_deep_from_keeps_ancestor_chain() {
    let (doc, root) = sample();
    let options = ExtractOptions::new().from_address(parse("/2/1"));

    let fragment = extract(&doc, root, &options).unwrap();

    assert_tree(&fragment.tree, fragment.root)
        .child_count(2)
        .child(0, |i| {
            i.tag("i").child(0, |text| {
                text.text("Think different");
            });
        })
        .child(1, |u| {
            u.tag("u").text_content("But be productive");
        });
}

#[test]
fn test_ordered_list_keeps_numbering() {
    let mut doc = Document::new();
    let root = doc.insert(
        &TreeSnapshot::element("div").with_child(
            TreeSnapshot::element("OL")
                .with_child(TreeSnapshot::element("LI").with_child(TreeSnapshot::text("first")))
                .with_child(TreeSnapshot::element("LI").with_child(TreeSnapshot::text("second")))
                .with_child(TreeSnapshot::element("LI").with_child(TreeSnapshot::text("third"))),
        ),
    );

    let from_text = ExtractOptions::new().from_address(parse("/1/3/1"));
    let fragment = extract(&doc, root, &from_text).unwrap();
    assert_tree(&fragment.tree, fragment.root).child(0, |list| {
        list.attribute("start", "3").child_count(1).text_content("third");
    });

    let from_item = ExtractOptions::new()
        .from_address(parse("/1/2"))
        .to_address(parse("/1/3"));
    let fragment = extract(&doc, root, &from_item).unwrap();
    assert_tree(&fragment.tree, fragment.root).child(0, |list| {
        list.attribute("start", "2").child_count(1).text_content("second");
    });

    // the source list is never renumbered
    let list = doc.first_child(root).unwrap();
    assert_eq!(doc.attribute(list, "start"), None);
}

#[test]
fn test_nested_ordered_lists_all_continue() {
    let mut doc = Document::new();
    let inner = TreeSnapshot::element("ol")
        .with_child(TreeSnapshot::element("li").with_child(TreeSnapshot::text("a")))
        .with_child(TreeSnapshot::element("li").with_child(TreeSnapshot::text("b")));
    let root = doc.insert(
        &TreeSnapshot::element("ol")
            .with_child(TreeSnapshot::element("li").with_child(TreeSnapshot::text("one")))
            .with_child(
                TreeSnapshot::element("li")
                    .with_child(TreeSnapshot::text("two"))
                    .with_child(inner),
            ),
    );

    let options = ExtractOptions::new().from_address(parse("/2/2/2"));
    let fragment = extract(&doc, root, &options).unwrap();

    assert_tree(&fragment.tree, fragment.root)
        .attribute("start", "2")
        .child(0, |outer_item| {
            outer_item.child_count(1).child(0, |inner_list| {
                inner_list.attribute("start", "2").text_content("b");
            });
        });
}

#[test]
fn test_existing_start_is_replaced_by_the_ordinal() {
    let mut doc = Document::new();
    let root = doc.insert(
        &TreeSnapshot::element("div").with_child(
            TreeSnapshot::element("ol")
                .with_attribute("start", "5")
                .with_child(TreeSnapshot::element("li").with_child(TreeSnapshot::text("a")))
                .with_child(TreeSnapshot::element("li").with_child(TreeSnapshot::text("b")))
                .with_child(TreeSnapshot::element("li").with_child(TreeSnapshot::text("c"))),
        ),
    );
    let options = ExtractOptions::new().from_address(parse("/1/3"));

    let fragment = extract(&doc, root, &options).unwrap();

    assert_tree(&fragment.tree, fragment.root).child(0, |list| {
        list.attribute("start", "3").child_count(1).text_content("c");
    });
}

#[test]
fn test_unordered_lists_are_left_alone() {
    let mut doc = Document::new();
    let root = doc.insert(
        &TreeSnapshot::element("ul")
            .with_child(TreeSnapshot::element("li"))
            .with_child(TreeSnapshot::element("li")),
    );
    let options = ExtractOptions::new().from_address(parse("/2"));

    let fragment = extract(&doc, root, &options).unwrap();

    assert_tree(&fragment.tree, fragment.root)
        .no_attribute("start")
        .child_count(1);
}

#[rstest]
#[case::from("/9", None)]
#[case::to("/1", Some("/3/1/1"))]
fn test_unresolved_bounds_are_errors(#[case] from: &str, #[case] to: Option<&str>) {
    let (doc, root) = sample();
    let mut options = ExtractOptions::new().from_address(parse(from));
    options.to = to.map(parse);

    let err = extract(&doc, root, &options).unwrap_err();

    assert!(matches!(err, CutError::UnresolvedBound { .. }), "{err}");
}

#[test]
fn test_inverted_range_is_an_error() {
    let (doc, root) = sample();
    let options = ExtractOptions::new()
        .from_address(parse("/2/1"))
        .to_address(parse("/2"));

    let err = extract(&doc, root, &options).unwrap_err();

    assert_eq!(
        err.to_string(),
        "range is inverted: from /2/1 comes after to /2"
    );
}
