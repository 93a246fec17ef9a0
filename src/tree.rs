/*!
 * Tree construction from flat path collections
 *
 * Converts the normalized file records into a nested folder/file
 * hierarchy under a synthetic root, and into a flat node list suitable
 * for an interactive tree widget.
 */

use std::collections::HashMap;

use serde::Serialize;

use crate::types::FileRecord;
use crate::utils::format_file_size;

/// A node in the directory hierarchy built for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Folder with children in first-encountered order
    Folder {
        name: String,
        full_path: String,
        children: Vec<TreeNode>,
    },
    /// Leaf file
    File {
        name: String,
        full_path: String,
        size: u64,
        is_binary: bool,
    },
}

impl TreeNode {
    /// Display name of the node
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder { name, .. } => name,
            TreeNode::File { name, .. } => name,
        }
    }

    /// Full relative path of the node
    pub fn full_path(&self) -> &str {
        match self {
            TreeNode::Folder { full_path, .. } => full_path,
            TreeNode::File { full_path, .. } => full_path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder { .. })
    }

    /// Children of a folder; empty for files
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Folder { children, .. } => children,
            TreeNode::File { .. } => &[],
        }
    }
}

/// Kind of a widget node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// One entry of the flat node list consumed by an interactive tree widget.
///
/// The node id is the full relative path; the label carries the formatted
/// size and a `[binary]` marker for files.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetNode {
    pub id: String,
    pub parent: Option<String>,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

// Arena used while building: children are index lists so shared folder
// prefixes resolve through one lookup instead of nested borrows.
struct Slot {
    name: String,
    full_path: String,
    file: Option<(u64, bool)>,
    children: Vec<usize>,
}

/// Build the directory hierarchy for a set of records.
///
/// Every path prefix maps to exactly one node: prefixes already seen are
/// reused, new ones are appended to their parent in first-encountered
/// order. Single-segment paths attach directly under the synthetic root;
/// an empty record set yields a childless root.
pub fn build_tree(records: &[FileRecord], root_name: &str) -> TreeNode {
    let mut slots = vec![Slot {
        name: root_name.to_string(),
        full_path: String::new(),
        file: None,
        children: Vec::new(),
    }];
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let segments: Vec<&str> = record.path.split('/').collect();
        let mut parent = 0;
        let mut prefix = String::new();

        for (depth, segment) in segments.iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);

            let slot = match index.get(prefix.as_str()) {
                Some(&existing) => existing,
                None => {
                    let is_file = depth == segments.len() - 1;
                    let id = slots.len();
                    slots.push(Slot {
                        name: (*segment).to_string(),
                        full_path: prefix.clone(),
                        file: is_file.then_some((record.size, record.is_binary)),
                        children: Vec::new(),
                    });
                    index.insert(prefix.clone(), id);
                    slots[parent].children.push(id);
                    id
                }
            };
            parent = slot;
        }
    }

    materialize(&slots, 0)
}

fn materialize(slots: &[Slot], id: usize) -> TreeNode {
    let slot = &slots[id];
    match slot.file {
        Some((size, is_binary)) => TreeNode::File {
            name: slot.name.clone(),
            full_path: slot.full_path.clone(),
            size,
            is_binary,
        },
        None => TreeNode::Folder {
            name: slot.name.clone(),
            full_path: slot.full_path.clone(),
            children: slot
                .children
                .iter()
                .map(|&child| materialize(slots, child))
                .collect(),
        },
    }
}

/// Build the flat widget node list for a set of records.
///
/// The root node carries the root name; every deeper path prefix becomes
/// one node keyed by its full path, parented to the preceding prefix.
/// Records are sorted by path first so the list is stable across runs.
pub fn widget_nodes(records: &[FileRecord], root_name: &str) -> Vec<WidgetNode> {
    let mut nodes = vec![WidgetNode {
        id: root_name.to_string(),
        parent: None,
        text: root_name.to_string(),
        kind: NodeKind::Folder,
    }];
    let mut seen: HashMap<String, usize> = HashMap::new();
    seen.insert(root_name.to_string(), 0);

    let mut sorted: Vec<&FileRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    for record in sorted {
        let segments: Vec<&str> = record.path.split('/').collect();
        let mut parent_id = root_name.to_string();

        for depth in 1..segments.len() {
            let sub_path = segments[..=depth].join("/");

            if !seen.contains_key(&sub_path) {
                let is_file = depth == segments.len() - 1;
                let mut text = segments[depth].to_string();
                if is_file {
                    if record.size > 0 {
                        text.push_str(&format!(" ({})", format_file_size(record.size)));
                    }
                    if record.is_binary {
                        text.push_str(" [binary]");
                    }
                }

                seen.insert(sub_path.clone(), nodes.len());
                nodes.push(WidgetNode {
                    id: sub_path.clone(),
                    parent: Some(parent_id.clone()),
                    text,
                    kind: if is_file {
                        NodeKind::File
                    } else {
                        NodeKind::Folder
                    },
                });
            }
            parent_id = sub_path;
        }
    }

    nodes
}
