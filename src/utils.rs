/*!
 * Small pure helpers: byte-count humanization, fenced-code-block language
 * tags, and per-extension icons for section headings.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::filter::extension;

/// Extension to fenced-code-block language tag
static LANGUAGE_TAGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("js", "javascript"),
        ("jsx", "javascript"),
        ("ts", "typescript"),
        ("tsx", "typescript"),
        ("html", "markup"),
        ("htm", "markup"),
        ("xml", "markup"),
        ("css", "css"),
        ("scss", "scss"),
        ("sass", "sass"),
        ("less", "less"),
        ("json", "json"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("md", "markdown"),
        ("markdown", "markdown"),
        ("py", "python"),
        ("java", "java"),
        ("c", "c"),
        ("cpp", "cpp"),
        ("cc", "cpp"),
        ("php", "php"),
        ("rb", "ruby"),
        ("go", "go"),
        ("rs", "rust"),
        ("sh", "bash"),
        ("bash", "bash"),
        ("zsh", "bash"),
        ("sql", "sql"),
        ("r", "r"),
        ("swift", "swift"),
        ("kt", "kotlin"),
        ("dart", "dart"),
        ("scala", "scala"),
        ("clj", "clojure"),
    ])
});

/// Extension to heading icon
static FILE_ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("js", "📄"),
        ("ts", "📘"),
        ("jsx", "⚛️"),
        ("tsx", "⚛️"),
        ("html", "🌐"),
        ("css", "🎨"),
        ("scss", "🎨"),
        ("sass", "🎨"),
        ("json", "📋"),
        ("xml", "📋"),
        ("yaml", "📋"),
        ("yml", "📋"),
        ("md", "📝"),
        ("txt", "📄"),
        ("py", "🐍"),
        ("java", "☕"),
        ("cpp", "⚙️"),
        ("c", "⚙️"),
        ("php", "🐘"),
        ("rb", "💎"),
        ("go", "🐹"),
        ("png", "🖼️"),
        ("jpg", "🖼️"),
        ("jpeg", "🖼️"),
        ("gif", "🖼️"),
        ("svg", "🖼️"),
        ("pdf", "📕"),
        ("zip", "📦"),
        ("tar", "📦"),
        ("gz", "📦"),
    ])
});

/// Format a human-readable file size.
///
/// Zero renders as `0 B`; otherwise the largest base-1024 unit with a
/// scaled value of at least 1 is chosen and rendered with one decimal.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size == 0 {
        "0 B".to_string()
    } else if size >= GB {
        format!("{:.1} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{:.1} B", size as f64)
    }
}

/// Map a file extension to its language tag.
///
/// Unknown extensions pass through unchanged, so the fence still renders
/// without semantic highlighting.
pub fn language_for_extension(ext: &str) -> String {
    match LANGUAGE_TAGS.get(ext) {
        Some(tag) => (*tag).to_string(),
        None => ext.to_string(),
    }
}

/// Pick the heading icon for a file name
pub fn icon_for_filename(filename: &str) -> &'static str {
    FILE_ICONS
        .get(extension(filename).as_str())
        .copied()
        .unwrap_or("📄")
}
