/*!
 * Tests for codemd functionality
 */

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tempfile::tempdir;

use crate::config::Config;
use crate::error::CodeMdError;
use crate::filter::{is_binary_name, should_exclude};
use crate::render::render_ascii;
use crate::scanner::Scanner;
use crate::session::Session;
use crate::tree::{build_tree, widget_nodes, NodeKind, TreeNode};
use crate::types::{FileRecord, RawItem, MAX_CONTENT_SIZE};
use crate::utils::{format_file_size, language_for_extension};
use crate::writer::{escape_fences, MarkdownWriter};

// Helper to build a text record with in-memory content
fn text_record(path: &str, content: &str) -> FileRecord {
    let owned = content.to_string();
    FileRecord {
        path: path.to_string(),
        size: owned.len() as u64,
        is_binary: false,
        source: Box::new(move || -> io::Result<String> { Ok(owned.clone()) }),
    }
}

// Helper to build a binary record; its content is never read
fn binary_record(path: &str, size: u64) -> FileRecord {
    FileRecord {
        path: path.to_string(),
        size,
        is_binary: true,
        source: Box::new(|| -> io::Result<String> { Ok(String::new()) }),
    }
}

// Helper to build a record whose read always fails
fn failing_record(path: &str) -> FileRecord {
    FileRecord {
        path: path.to_string(),
        size: 10,
        is_binary: false,
        source: Box::new(|| -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }),
    }
}

fn raw_item(path: &str, content: &str) -> RawItem {
    let owned = content.to_string();
    RawItem {
        relative_path: Some(path.to_string()),
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        size: owned.len() as u64,
        source: Box::new(move || -> io::Result<String> { Ok(owned.clone()) }),
    }
}

fn noop() -> impl FnMut() {
    || {}
}

// Count nodes and collect full paths, checking for duplicates
fn collect_paths(node: &TreeNode, paths: &mut Vec<String>) {
    paths.push(node.full_path().to_string());
    for child in node.children() {
        collect_paths(child, paths);
    }
}

#[test]
fn test_tree_builder_dedup() {
    let records = vec![
        text_record("a/b.txt", "b"),
        text_record("a/c.txt", "c"),
        text_record("a/d/e.txt", "e"),
        text_record("a/d/f.txt", "f"),
    ];

    let root = build_tree(&records, "root");

    let mut paths = Vec::new();
    collect_paths(&root, &mut paths);
    // Synthetic root plus one node per unique prefix
    let unique: HashSet<&String> = paths.iter().collect();
    assert_eq!(paths.len(), unique.len());
    assert_eq!(paths.len(), 1 + 6); // a, a/b.txt, a/c.txt, a/d, a/d/e.txt, a/d/f.txt

    // Every file's ancestor chain exists as folder nodes
    assert_eq!(root.children().len(), 1);
    let a = &root.children()[0];
    assert!(a.is_folder());
    assert_eq!(a.children().len(), 3);
    let d = a
        .children()
        .iter()
        .find(|n| n.name() == "d")
        .expect("folder d exists");
    assert!(d.is_folder());
    assert_eq!(d.children().len(), 2);
}

#[test]
fn test_tree_builder_single_segment_and_empty() {
    let records = vec![text_record("README.md", "hi")];
    let root = build_tree(&records, "root");
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0].name(), "README.md");
    assert!(!root.children()[0].is_folder());

    let empty = build_tree(&[], "root");
    assert!(empty.children().is_empty());
    assert!(empty.is_folder());
}

#[test]
fn test_ascii_tree_mixed_top_level() {
    let records = vec![
        text_record("a/b.txt", "b"),
        text_record("a/c.txt", "c"),
        text_record("d.txt", "d"),
    ];
    let root = build_tree(&records, "root");
    let lines: Vec<String> = render_ascii(&root).lines().map(String::from).collect();

    assert_eq!(
        lines,
        vec![
            "├── a/",
            "│   ├── b.txt",
            "│   └── c.txt",
            "└── d.txt",
        ]
    );
}

#[test]
fn test_ascii_tree_single_root_collapse() {
    let records = vec![
        text_record("proj/src/main.rs", "fn main() {}"),
        text_record("proj/README.md", "readme"),
    ];
    let root = build_tree(&records, "proj");
    let lines: Vec<String> = render_ascii(&root).lines().map(String::from).collect();

    assert_eq!(
        lines,
        vec![
            "proj/",
            "├── src/",
            "│   └── main.rs",
            "└── README.md",
        ]
    );
}

#[test]
fn test_ascii_tree_deterministic_ordering() {
    let forward = vec![
        text_record("z.txt", "z"),
        text_record("a/x.txt", "x"),
        text_record("b.txt", "b"),
        text_record("a/m/n.txt", "n"),
    ];
    let reversed = vec![
        text_record("a/m/n.txt", "n"),
        text_record("b.txt", "b"),
        text_record("a/x.txt", "x"),
        text_record("z.txt", "z"),
    ];

    let one = render_ascii(&build_tree(&forward, "root"));
    let two = render_ascii(&build_tree(&reversed, "root"));
    assert_eq!(one, two);

    // Folders precede files at the top level
    assert!(one.starts_with("├── a/"));
}

#[test]
fn test_format_file_size() {
    assert_eq!(format_file_size(0), "0 B");
    assert_eq!(format_file_size(512), "512.0 B");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(1_048_576), "1.0 MB");
    assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
}

#[test]
fn test_language_mapping() {
    assert_eq!(language_for_extension("rs"), "rust");
    assert_eq!(language_for_extension("js"), "javascript");
    assert_eq!(language_for_extension("html"), "markup");
    // Unknown extensions pass through unchanged
    assert_eq!(language_for_extension("xyz"), "xyz");
    assert_eq!(language_for_extension(""), "");
}

#[test]
fn test_path_filter_segment_anchoring() {
    assert!(should_exclude(".git/config"));
    assert!(should_exclude("src/.git/HEAD"));
    assert!(should_exclude("app/node_modules/lib/index.js"));
    assert!(should_exclude("dist/bundle.js"));
    assert!(should_exclude("a/build/out.o"));
    assert!(should_exclude("coverage/lcov.info"));
    assert!(should_exclude("photos/.DS_Store"));
    assert!(should_exclude("docs/.gitignore"));

    // Denylisted names as substrings of longer segments are fine
    assert!(!should_exclude("rebuild/out.o"));
    assert!(!should_exclude("distilled.txt"));
    assert!(!should_exclude("my_node_modules/index.js"));
    assert!(!should_exclude("src/gitlab.rs"));
    assert!(!should_exclude("coverage_report.txt"));
}

#[test]
fn test_binary_classification_case_insensitive() {
    assert!(is_binary_name("image.png"));
    assert!(is_binary_name("IMAGE.PNG"));
    assert!(is_binary_name("archive.tar"));
    assert!(!is_binary_name("script.JS"));
    assert!(!is_binary_name("main.rs"));
    // No extension means text
    assert!(!is_binary_name("Makefile"));
}

#[test]
fn test_oversize_file_never_reads_content() {
    let touched = Arc::new(AtomicBool::new(false));
    let probe = Arc::clone(&touched);
    let big = FileRecord {
        path: "huge.log".to_string(),
        size: MAX_CONTENT_SIZE + 1,
        is_binary: false,
        source: Box::new(move || -> io::Result<String> {
            probe.store(true, Ordering::SeqCst);
            Ok(String::new())
        }),
    };

    let mut writer = MarkdownWriter::new();
    let doc = writer
        .generate(&[big], "huge.log", &mut noop())
        .expect("generation succeeds");

    assert!(!touched.load(Ordering::SeqCst));
    assert!(doc
        .markdown
        .contains("*File too large (1.0 MB) - content skipped*"));
    assert_eq!(writer.statistics().oversize_skipped, 1);
}

#[test]
fn test_read_failure_is_isolated() {
    let records = vec![failing_record("a.txt"), text_record("b.txt", "still here")];

    let mut writer = MarkdownWriter::new();
    let doc = writer
        .generate(&records, "tree", &mut noop())
        .expect("run succeeds despite one failure");

    assert!(doc.markdown.contains("*Error reading file content*"));
    assert!(doc.markdown.contains("still here"));
    // b.txt still comes after a.txt in path order
    let a_pos = doc.markdown.find("`a.txt`").unwrap();
    let b_pos = doc.markdown.find("`b.txt`").unwrap();
    assert!(a_pos < b_pos);
}

#[test]
fn test_fence_escaping() {
    assert_eq!(escape_fences("no fences"), "no fences");
    assert_eq!(escape_fences("```rust"), "\\`\\`\\`rust");

    let records = vec![text_record("evil.md", "before\n```\nafter")];
    let mut writer = MarkdownWriter::new();
    let doc = writer.generate(&records, "tree", &mut noop()).unwrap();

    // The only raw fences left are the enclosing pair
    let raw_fences = doc
        .markdown
        .lines()
        .filter(|l| l.starts_with("```"))
        .count();
    assert_eq!(raw_fences, 2);
    assert!(doc.markdown.contains("\\`\\`\\`"));
}

#[test]
fn test_document_layout_and_stats() {
    let records = vec![
        text_record("src/main.rs", "fn main() {}\n"),
        binary_record("logo.png", 2048),
    ];

    let mut writer = MarkdownWriter::new();
    let doc = writer.generate(&records, "app/", &mut noop()).unwrap();

    // Tree first, then a blank line
    assert!(doc.markdown.starts_with("app/\n\n"));
    // Section separator, heading with inline code span, rust fence
    assert!(doc.markdown.contains("---\n\n### "));
    assert!(doc.markdown.contains("`src/main.rs`"));
    assert!(doc.markdown.contains("```rust\nfn main() {}\n\n```"));
    // Binary listing with formatted size
    assert!(doc.markdown.contains("## 🗂️ Binary Files (Skipped)"));
    assert!(doc.markdown.contains("- `logo.png` (2.0 KB)"));

    assert_eq!(doc.file_count, 2);
    assert_eq!(doc.total_bytes, 13 + 2048);
    assert_eq!(writer.statistics().binary_listed, 1);
}

#[test]
fn test_binary_section_absent_without_binaries() {
    let records = vec![text_record("a.txt", "a")];
    let mut writer = MarkdownWriter::new();
    let doc = writer.generate(&records, "tree", &mut noop()).unwrap();
    assert!(!doc.markdown.contains("Binary Files"));
}

#[test]
fn test_yielding_does_not_change_output() {
    let records = || {
        (0..17)
            .map(|i| text_record(&format!("f{:02}.txt", i), "content"))
            .collect::<Vec<_>>()
    };

    let mut calls = 0usize;
    let mut with_hook = MarkdownWriter::new();
    let counted = with_hook
        .generate(&records(), "tree", &mut || calls += 1)
        .unwrap();

    let mut without_hook = MarkdownWriter::new();
    let plain = without_hook.generate(&records(), "tree", &mut noop()).unwrap();

    assert!(calls > 0);
    assert_eq!(counted.markdown, plain.markdown);
}

#[test]
fn test_empty_records_is_distinguishable() {
    let mut writer = MarkdownWriter::new();
    let err = writer.generate(&[], "tree", &mut noop()).unwrap_err();
    assert!(matches!(err, CodeMdError::NoValidFiles));
}

#[test]
fn test_session_no_input_and_no_valid_files() {
    let mut session = Session::new();
    let err = session.ingest(Vec::new(), &mut noop()).unwrap_err();
    assert!(matches!(err, CodeMdError::NoInput));

    // Everything excluded leaves nothing to process
    let items = vec![
        raw_item("proj/.git/config", "x"),
        raw_item("proj/node_modules/a.js", "x"),
    ];
    session.ingest(items, &mut noop()).unwrap();
    assert!(session.records().is_empty());
    let err = session.generate(&mut noop()).unwrap_err();
    assert!(matches!(err, CodeMdError::NoValidFiles));
    assert!(session.document().is_none());
}

#[test]
fn test_session_pipeline_and_reset() {
    let mut session = Session::new();
    let items = vec![
        raw_item("proj/src/lib.rs", "pub fn x() {}"),
        raw_item("proj/.git/config", "ignored"),
        raw_item("proj/README.md", "# proj"),
    ];
    session.ingest(items, &mut noop()).unwrap();

    assert_eq!(session.root_name(), "proj");
    assert_eq!(session.records().len(), 2);

    let doc = session.generate(&mut noop()).unwrap();
    assert!(doc.markdown.starts_with("proj/\n"));
    assert!(doc.markdown.contains("pub fn x() {}"));
    assert!(!doc.markdown.contains("ignored"));

    session.reset();
    assert!(session.records().is_empty());
    assert!(session.document().is_none());
}

#[test]
fn test_root_name_derivation() {
    // Relative path: first segment wins
    let mut session = Session::new();
    session
        .ingest(vec![raw_item("my-app/src/a.rs", "a")], &mut noop())
        .unwrap();
    assert_eq!(session.root_name(), "my-app");

    // Single rootless file: the bare name
    let single = RawItem {
        relative_path: None,
        name: "notes.txt".to_string(),
        size: 1,
        source: Box::new(|| -> io::Result<String> { Ok("n".to_string()) }),
    };
    session.ingest(vec![single], &mut noop()).unwrap();
    assert_eq!(session.root_name(), "notes.txt");

    // Multiple rootless files: first filename's stem
    let loose = |name: &str| RawItem {
        relative_path: None,
        name: name.to_string(),
        size: 1,
        source: Box::new(|| -> io::Result<String> { Ok("x".to_string()) }),
    };
    session
        .ingest(vec![loose("report.md"), loose("data.csv")], &mut noop())
        .unwrap();
    assert_eq!(session.root_name(), "report");

    // A leading-dot first name falls back to the generic label
    session
        .ingest(vec![loose(".env"), loose("data.csv")], &mut noop())
        .unwrap();
    assert_eq!(session.root_name(), "Project");
}

#[test]
fn test_widget_nodes() {
    let records = vec![
        text_record("proj/src/main.rs", "fn main() {}"),
        binary_record("proj/logo.png", 2048),
    ];
    let nodes = widget_nodes(&records, "proj");

    assert_eq!(nodes[0].id, "proj");
    assert!(nodes[0].parent.is_none());
    assert_eq!(nodes[0].kind, NodeKind::Folder);

    let main = nodes.iter().find(|n| n.id == "proj/src/main.rs").unwrap();
    assert_eq!(main.parent.as_deref(), Some("proj/src"));
    assert_eq!(main.kind, NodeKind::File);
    assert!(main.text.contains("main.rs"));

    let logo = nodes.iter().find(|n| n.id == "proj/logo.png").unwrap();
    assert!(logo.text.contains("(2.0 KB)"));
    assert!(logo.text.contains("[binary]"));

    let src = nodes.iter().find(|n| n.id == "proj/src").unwrap();
    assert_eq!(src.kind, NodeKind::Folder);
    assert_eq!(src.parent.as_deref(), Some("proj"));
}

// Helper to create a test directory structure on disk
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;

    fs::create_dir(temp_dir.path().join("src"))?;
    fs::create_dir(temp_dir.path().join(".git"))?;

    let mut main_rs = File::create(temp_dir.path().join("src").join("main.rs"))?;
    writeln!(main_rs, "fn main() {{}}")?;

    let mut readme = File::create(temp_dir.path().join("README.md"))?;
    writeln!(readme, "# Test project")?;

    let mut git_file = File::create(temp_dir.path().join(".git").join("config"))?;
    writeln!(git_file, "[core]")?;

    let mut png = File::create(temp_dir.path().join("logo.png"))?;
    png.write_all(&[0x89, 0x50, 0x4e, 0x47])?;

    Ok(temp_dir)
}

fn test_config(dir: &std::path::Path) -> Config {
    Config {
        target_dir: dir.to_path_buf(),
        output_file: dir.join("project-structure.md"),
        ignore_patterns: vec![],
        include_patterns: vec![],
        respect_gitignore: false,
        gitignore_path: None,
        tree_json: None,
        clip: false,
    }
}

#[test]
fn test_scanner_end_to_end() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root_name = temp_dir
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();

    let scanner = Scanner::new(test_config(temp_dir.path()));
    let items = scanner.scan().expect("scan succeeds");
    assert!(!items.is_empty());

    let mut session = Session::new();
    session.ingest(items, &mut noop()).expect("ingest succeeds");
    assert_eq!(session.root_name(), root_name);

    let doc = session.generate(&mut noop()).expect("generate succeeds");
    assert!(doc.markdown.contains("fn main() {}"));
    assert!(doc.markdown.contains("# Test project"));
    // .git contents are excluded by the path filter
    assert!(!doc.markdown.contains("[core]"));
    // The png lands in the binary list, not a fence
    assert!(doc.markdown.contains("- `"));
    assert!(doc.markdown.contains("logo.png"));

    Ok(())
}

#[test]
fn test_scanner_ignore_patterns() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut config = test_config(temp_dir.path());
    config.ignore_patterns = vec!["*.md".to_string()];

    let scanner = Scanner::new(config);
    let items = scanner.scan().expect("scan succeeds");

    assert!(items
        .iter()
        .all(|i| !i.relative_path.as_deref().unwrap_or("").ends_with(".md")));

    Ok(())
}

#[test]
fn test_scanner_include_patterns() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut config = test_config(temp_dir.path());
    config.include_patterns = vec!["*.rs".to_string()];

    let scanner = Scanner::new(config);
    let items = scanner.scan().expect("scan succeeds");

    assert!(!items.is_empty());
    assert!(items
        .iter()
        .all(|i| i.relative_path.as_deref().unwrap_or("").ends_with(".rs")));

    Ok(())
}
