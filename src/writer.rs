/*!
 * Markdown document assembly
 *
 * Serializes the filtered records, in path order, into the final document:
 * the rendered tree, one fenced section per text file, and a trailing list
 * of binary files. Failures reading a single file are isolated to that
 * file's section; the run itself only fails when nothing is processable.
 */

use std::collections::HashMap;

use crate::error::{CodeMdError, Result};
use crate::filter::extension;
use crate::report::FileReportInfo;
use crate::types::{FileRecord, GeneratedDocument, MAX_CONTENT_SIZE};
use crate::utils::{format_file_size, icon_for_filename, language_for_extension};

/// Yield to the host after this many file sections
pub const CONTENT_YIELD_BATCH: usize = 5;

/// Statistics collected while assembling a document
#[derive(Debug, Clone, Default)]
pub struct WriterStatistics {
    /// Number of records the document covers (text and binary)
    pub files_processed: usize,
    /// Total number of lines across included files
    pub total_lines: usize,
    /// Total number of characters across included files
    pub total_chars: usize,
    /// Files elided for exceeding the size limit
    pub oversize_skipped: usize,
    /// Binary files listed instead of included
    pub binary_listed: usize,
    /// Details for each file
    pub file_details: HashMap<String, FileReportInfo>,
}

/// Markdown writer for the file-set document
#[derive(Default)]
pub struct MarkdownWriter {
    statistics: WriterStatistics,
}

impl MarkdownWriter {
    /// Create a new writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the last `generate` call
    pub fn statistics(&self) -> &WriterStatistics {
        &self.statistics
    }

    /// Assemble the final Markdown document.
    ///
    /// `tree_text` is the pre-rendered ASCII tree; `yield_hook` is invoked
    /// on a fixed cadence during the per-file loop and has no effect on
    /// the result.
    pub fn generate(
        &mut self,
        records: &[FileRecord],
        tree_text: &str,
        yield_hook: &mut dyn FnMut(),
    ) -> Result<GeneratedDocument> {
        if records.is_empty() {
            return Err(CodeMdError::NoValidFiles);
        }

        self.statistics = WriterStatistics {
            files_processed: records.len(),
            ..WriterStatistics::default()
        };

        let mut markdown = format!("{}\n\n", tree_text);

        let (binary, text): (Vec<&FileRecord>, Vec<&FileRecord>) =
            records.iter().partition(|r| r.is_binary);

        let mut sorted_text = text;
        sorted_text.sort_by(|a, b| a.path.cmp(&b.path));

        for (index, record) in sorted_text.iter().enumerate() {
            self.write_file_section(&mut markdown, record);

            if index % CONTENT_YIELD_BATCH == 0 {
                yield_hook();
            }
        }

        if !binary.is_empty() {
            self.statistics.binary_listed = binary.len();
            markdown.push_str("---\n\n## 🗂️ Binary Files (Skipped)\n\n");
            for record in &binary {
                markdown.push_str(&format!(
                    "- `{}` ({})\n",
                    record.path,
                    format_file_size(record.size)
                ));
            }
            markdown.push('\n');
        }

        Ok(GeneratedDocument {
            markdown,
            file_count: records.len(),
            total_bytes: records.iter().map(|r| r.size).sum(),
        })
    }

    fn write_file_section(&mut self, markdown: &mut String, record: &FileRecord) {
        let name = record.path.rsplit('/').next().unwrap_or(&record.path);
        markdown.push_str(&format!(
            "---\n\n### {} `{}`\n\n",
            icon_for_filename(name),
            record.path
        ));

        // Oversize files are a policy skip, never a read
        if record.size > MAX_CONTENT_SIZE {
            self.statistics.oversize_skipped += 1;
            self.statistics
                .file_details
                .insert(record.path.clone(), FileReportInfo::default());
            markdown.push_str(&format!(
                "*File too large ({}) - content skipped*\n\n",
                format_file_size(record.size)
            ));
            return;
        }

        match record.source.read_text() {
            Ok(content) => {
                self.record_content_stats(&record.path, &content);
                let lang = language_for_extension(&extension(name));
                markdown.push_str(&format!(
                    "```{}\n{}\n```\n\n",
                    lang,
                    escape_fences(&content)
                ));
            }
            Err(_) => {
                // Isolated failure: placeholder section, run continues
                self.statistics
                    .file_details
                    .insert(record.path.clone(), FileReportInfo::default());
                markdown.push_str("*Error reading file content*\n\n");
            }
        }
    }

    fn record_content_stats(&mut self, path: &str, content: &str) {
        let lines = content.lines().count();
        let chars = content.chars().count();
        self.statistics.total_lines += lines;
        self.statistics.total_chars += chars;
        self.statistics
            .file_details
            .insert(path.to_string(), FileReportInfo { lines, chars });
    }
}

/// Escape embedded triple backticks so file content can never close the
/// enclosing fence early.
pub fn escape_fences(content: &str) -> String {
    content.replace("```", "\\`\\`\\`")
}
