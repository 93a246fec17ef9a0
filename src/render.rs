/*!
 * ASCII tree rendering
 *
 * Renders the built hierarchy as connector-based ASCII art. Ordering is
 * re-derived at every level (folders before files, lexicographic within
 * each group) so the output is deterministic regardless of the insertion
 * order the builder happened to see.
 */

use crate::tree::TreeNode;

/// Render the hierarchy under a synthetic root as ASCII-art text.
///
/// When the root holds exactly one top-level entry, that entry collapses
/// onto the first line as `<name>/` and its children render with an empty
/// initial prefix; otherwise all top-level entries render as siblings.
pub fn render_ascii(root: &TreeNode) -> String {
    let mut lines = Vec::new();
    let top = sorted_children(root);

    if top.len() == 1 {
        let only = top[0];
        lines.push(format!("{}/", only.name()));
        render_level(only, "", &mut lines);
    } else {
        render_siblings(&top, "", &mut lines);
    }

    lines.join("\n")
}

fn render_level(node: &TreeNode, prefix: &str, lines: &mut Vec<String>) {
    let children = sorted_children(node);
    render_siblings(&children, prefix, lines);
}

fn render_siblings(entries: &[&TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (index, entry) in entries.iter().enumerate() {
        let is_last = index == entries.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let suffix = if entry.is_folder() { "/" } else { "" };
        lines.push(format!("{}{}{}{}", prefix, connector, entry.name(), suffix));

        if !entry.children().is_empty() {
            let continuation = if is_last { "    " } else { "│   " };
            let child_prefix = format!("{}{}", prefix, continuation);
            render_level(entry, &child_prefix, lines);
        }
    }
}

/// Sibling ordering rule: folders first, then files, lexicographic by
/// name within each group.
fn sorted_children(node: &TreeNode) -> Vec<&TreeNode> {
    let mut children: Vec<&TreeNode> = node.children().iter().collect();
    children.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| a.name().cmp(b.name()))
    });
    children
}
