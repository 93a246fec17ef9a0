/*!
 * CodeMd - Generate Markdown representation of directory contents for LLM context
 *
 * This library turns a flat set of file records into a single Markdown
 * document: an ASCII directory tree followed by fenced code blocks with
 * every text file's content, with binary files listed separately.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod filter;
pub mod render;
pub mod report;
pub mod scanner;
pub mod session;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::Config;
pub use error::{CodeMdError, Result};
pub use render::render_ascii;
pub use report::{FileReportInfo, GenerationReport, ReportFormat, Reporter};
pub use scanner::Scanner;
pub use session::Session;
pub use tree::{build_tree, widget_nodes, NodeKind, TreeNode, WidgetNode};
pub use types::{ContentSource, FileRecord, GeneratedDocument, RawItem, MAX_CONTENT_SIZE};
pub use utils::format_file_size;
pub use writer::MarkdownWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
