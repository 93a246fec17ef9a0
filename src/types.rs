/*!
 * Core types and data structures for the codemd pipeline
 */

use std::io;

/// Maximum content size in bytes before a file is elided from the document
pub const MAX_CONTENT_SIZE: u64 = 1_048_576;

/// Source of a file's textual content, read on demand.
///
/// Content is only pulled when the document assembler decides to include
/// the file, so oversize files never cost a read.
pub trait ContentSource {
    /// Read the full content as UTF-8 text
    fn read_text(&self) -> io::Result<String>;
}

impl<F> ContentSource for F
where
    F: Fn() -> io::Result<String>,
{
    fn read_text(&self) -> io::Result<String> {
        self()
    }
}

/// A raw input item as supplied by the surrounding collaborator
/// (directory scanner, drag-and-drop layer, file picker).
pub struct RawItem {
    /// Relative path with `/` separators, if the collaborator knows one
    pub relative_path: Option<String>,
    /// Bare file name, used when no relative path is available
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// On-demand content reader
    pub source: Box<dyn ContentSource>,
}

/// A normalized file record, immutable for the duration of one run
pub struct FileRecord {
    /// Slash-separated relative path with no leading slash
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Whether the file was classified as binary (by extension)
    pub is_binary: bool,
    /// On-demand content reader
    pub source: Box<dyn ContentSource>,
}

impl std::fmt::Debug for FileRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRecord")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("is_binary", &self.is_binary)
            .finish_non_exhaustive()
    }
}

/// The finished Markdown document with its derived statistics
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// The full Markdown text
    pub markdown: String,
    /// Number of records that went into the run (text and binary)
    pub file_count: usize,
    /// Total size of those records in bytes
    pub total_bytes: u64,
}
