/*!
 * Per-run session state
 *
 * One `Session` holds the ingested records, the derived root name, and the
 * last successfully generated document. A new run replaces the previous
 * document only on success; `reset` discards everything.
 */

use crate::error::{CodeMdError, Result};
use crate::filter::{is_binary_name, should_exclude};
use crate::render::render_ascii;
use crate::tree::{self, TreeNode, WidgetNode};
use crate::types::{FileRecord, GeneratedDocument, RawItem};
use crate::writer::{MarkdownWriter, WriterStatistics};

/// Yield to the host after this many items during ingest filtering
pub const FILTER_YIELD_BATCH: usize = 10;

/// Root label fallbacks for rootless selections
const FALLBACK_ROOT: &str = "Selected Files";
const FALLBACK_PROJECT: &str = "Project";

/// State for one file-set-to-document run
#[derive(Default)]
pub struct Session {
    root_name: String,
    records: Vec<FileRecord>,
    document: Option<GeneratedDocument>,
    statistics: WriterStatistics,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Label of the synthetic top-level folder
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Records accepted by the path filter
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// The last successfully generated document, if any
    pub fn document(&self) -> Option<&GeneratedDocument> {
        self.document.as_ref()
    }

    /// Statistics of the last successful generation
    pub fn statistics(&self) -> &WriterStatistics {
        &self.statistics
    }

    /// Normalize and filter a collection of raw items into file records.
    ///
    /// Paths fall back to the bare filename when the collaborator supplied
    /// no relative path; a leading slash is stripped. Excluded paths are
    /// dropped, the rest are classified as text or binary by extension.
    /// `yield_hook` runs on a fixed item cadence.
    pub fn ingest(&mut self, items: Vec<RawItem>, yield_hook: &mut dyn FnMut()) -> Result<()> {
        if items.is_empty() {
            return Err(CodeMdError::NoInput);
        }

        self.root_name = derive_root_name(&items);
        self.records.clear();
        self.document = None;

        for (index, item) in items.into_iter().enumerate() {
            let raw = match &item.relative_path {
                Some(path) if !path.is_empty() => path.as_str(),
                _ => item.name.as_str(),
            };
            let path = raw.strip_prefix('/').unwrap_or(raw).to_string();

            if !should_exclude(&path) {
                self.records.push(FileRecord {
                    is_binary: is_binary_name(&item.name),
                    path,
                    size: item.size,
                    source: item.source,
                });
            }

            if index % FILTER_YIELD_BATCH == 0 {
                yield_hook();
            }
        }

        Ok(())
    }

    /// Build the directory hierarchy for the current records
    pub fn build_tree(&self) -> TreeNode {
        tree::build_tree(&self.records, &self.root_name)
    }

    /// Flat node list for an interactive tree widget
    pub fn widget_nodes(&self) -> Vec<WidgetNode> {
        tree::widget_nodes(&self.records, &self.root_name)
    }

    /// Run the full pipeline: tree construction, ASCII rendering, document
    /// assembly. The session's document is replaced only when the whole
    /// run succeeds.
    pub fn generate(&mut self, yield_hook: &mut dyn FnMut()) -> Result<&GeneratedDocument> {
        if self.records.is_empty() {
            return Err(CodeMdError::NoValidFiles);
        }

        let tree = self.build_tree();
        let tree_text = render_ascii(&tree);

        let mut writer = MarkdownWriter::new();
        let document = writer.generate(&self.records, &tree_text, yield_hook)?;

        self.statistics = writer.statistics().clone();
        self.document = Some(document);
        Ok(self.document.as_ref().expect("document just set"))
    }

    /// Discard all per-run state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Derive the root label from the first item: its first path segment when
/// a relative path exists, the bare name for a single-file selection, the
/// first filename's stem otherwise.
fn derive_root_name(items: &[RawItem]) -> String {
    let Some(first) = items.first() else {
        return FALLBACK_ROOT.to_string();
    };

    if let Some(path) = &first.relative_path {
        if let Some(segment) = path.split('/').find(|s| !s.is_empty()) {
            return segment.to_string();
        }
    }

    if items.len() == 1 {
        return first.name.clone();
    }

    match first.name.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => FALLBACK_PROJECT.to_string(),
    }
}
