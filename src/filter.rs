/*!
 * Path filtering and binary classification
 *
 * Both checks are pure lookups against static tables: exclusion matches
 * whole path segments (never substrings, so `rebuild/` or `distilled.txt`
 * survive a denylist containing `build` and `dist`), and binary detection
 * looks only at the lowercased extension.
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Path segments that are never processed: VCS internals, dependency and
/// build-artifact directories, editor state, OS junk, VCS marker files.
static DENIED_SEGMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        // Version control
        ".git",
        ".gitignore",
        ".gitkeep",
        // Dependencies
        "node_modules",
        // Build output
        "dist",
        "build",
        "coverage",
        ".nyc_output",
        // Editors
        ".vscode",
        ".idea",
        // OS files
        ".DS_Store",
        "Thumbs.db",
    ])
});

/// Extensions treated as binary formats
static BINARY_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        // Images
        "jpg", "jpeg", "png", "gif", "ico", "webp", "svg", "bmp", "tiff",
        // Documents
        "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
        // Archives
        "zip", "rar", "7z", "tar", "gz", "bz2",
        // Audio/Video
        "mp3", "mp4", "avi", "mov", "wmv", "flv",
        // Fonts
        "woff", "woff2", "ttf", "eot", "otf",
        // Compiled objects
        "exe", "dll", "so", "dylib", "class", "jar", "war",
    ])
});

/// Check whether a relative path should be excluded from processing.
///
/// True when any `/`-separated segment exactly matches the denylist.
pub fn should_exclude(path: &str) -> bool {
    path.split('/').any(|segment| DENIED_SEGMENTS.contains(segment))
}

/// Extract the extension of a file name: the text after the last `.`,
/// lowercased, or an empty string when there is no dot.
pub fn extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Classify a file as binary from its name alone.
///
/// Files with no extension or an unknown extension are treated as text;
/// content is never sniffed.
pub fn is_binary_name(filename: &str) -> bool {
    BINARY_EXTENSIONS.contains(extension(filename).as_str())
}
