//! Treeviz formatter for tree snapshots
//!
//! One line per node, nesting encoded as 2 columns of indentation per level with
//! box-drawing connectors. Meant for eyeballing cut results and for snapshot tests,
//! not as a markup serialization: nothing is escaped except line breaks in text.
//!
//! The format is:
//! <prefix><connector> <icon> <label>
//!
//! Example:
//!
//!   ◇ div
//!   ├─ ◇ ol start=3
//!   │ └─ ◇ li
//!   │   └─ ↵ Third item
//!   └─ ↵ trailing text
//!
//! Icons
//!     Element: ◇ (label is the tag followed by name=value attributes)
//!     Text: ↵ (label is the text, truncated to 30 characters)

use crate::cut::dom::TreeRead;
use crate::cut::snapshot::{self, TreeSnapshot};

const MAX_TEXT_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node: &TreeSnapshot) -> &'static str {
    match node {
        TreeSnapshot::Element { .. } => "◇",
        TreeSnapshot::Text { .. } => "↵",
    }
}

fn get_label(node: &TreeSnapshot) -> String {
    match node {
        TreeSnapshot::Element {
            tag, attributes, ..
        } => {
            let mut label = tag.clone();
            for attr in attributes {
                label.push_str(&format!(" {}={}", attr.name, attr.value));
            }
            label
        }
        TreeSnapshot::Text { value } => {
            truncate(&value.replace('\n', "\\n"), MAX_TEXT_CHARS)
        }
    }
}

/// Render a snapshot
pub fn to_treeviz_str(snapshot: &TreeSnapshot) -> String {
    let mut output = format!("{} {}\n", get_icon(snapshot), get_label(snapshot));

    // (node, prefix, is_last), popped in document order
    let mut pending: Vec<(&TreeSnapshot, String, bool)> = Vec::new();
    push_children(&mut pending, snapshot, String::new());

    while let Some((node, prefix, is_last)) = pending.pop() {
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!(
            "{}{} {} {}\n",
            prefix,
            connector,
            get_icon(node),
            get_label(node)
        ));
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        push_children(&mut pending, node, child_prefix);
    }

    output
}

fn push_children<'a>(
    pending: &mut Vec<(&'a TreeSnapshot, String, bool)>,
    node: &'a TreeSnapshot,
    prefix: String,
) {
    let children = node.children();
    for (i, child) in children.iter().enumerate().rev() {
        pending.push((child, prefix.clone(), i == children.len() - 1));
    }
}

/// Render the subtree under `node`
pub fn treeviz<T>(tree: &T, node: T::Node) -> String
where
    T: TreeRead + ?Sized,
{
    to_treeviz_str(&snapshot::snapshot(tree, node))
}
