/*!
 * Directory scanning: the CLI-side input collaborator
 *
 * Walks the target directory and produces the flat raw-item list the core
 * pipeline ingests. Relative paths are slash-separated and prefixed with
 * the target directory's name, mirroring how a folder picker reports
 * paths. Content is wrapped in on-demand readers, never loaded here.
 */

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use glob_match::glob_match;
use ignore::WalkBuilder;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::types::{ContentSource, RawItem};

/// On-demand reader backed by a filesystem path
pub struct FsContentSource {
    path: PathBuf,
}

impl FsContentSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ContentSource for FsContentSource {
    fn read_text(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

/// Scanner for directory contents
pub struct Scanner {
    config: Config,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Walk the target directory and collect raw items, sorted by path
    pub fn scan(&self) -> Result<Vec<RawItem>> {
        let abs_root = fs::canonicalize(&self.config.target_dir)
            .with_context(|| format!("Scanning {}", self.config.target_dir.display()))?;
        let root_name = abs_root
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let mut items = Vec::new();
        for abs_path in self.walk_files(&abs_root)? {
            if let Some(item) = self.make_item(&abs_root, &root_name, &abs_path)? {
                items.push(item);
            }
        }

        items.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(items)
    }

    /// Count files for progress tracking
    pub fn count_files(&self) -> Result<u64> {
        let abs_root = fs::canonicalize(&self.config.target_dir)
            .with_context(|| format!("Scanning {}", self.config.target_dir.display()))?;
        Ok(self.walk_files(&abs_root)?.len() as u64)
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        if self.config.respect_gitignore {
            let mut walker = WalkBuilder::new(root);
            if let Some(gitignore_path) = &self.config.gitignore_path {
                walker.add_custom_ignore_filename(gitignore_path);
            }

            for entry in walker.build().filter_map(std::result::Result::ok) {
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && !self.should_ignore(entry.path())
                    && self.should_include(entry.path())
                {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            for entry in WalkDir::new(root).into_iter().filter_map(std::result::Result::ok) {
                if entry.file_type().is_file()
                    && !self.should_ignore(entry.path())
                    && self.should_include(entry.path())
                {
                    files.push(entry.path().to_path_buf());
                }
            }
        }

        Ok(files)
    }

    fn make_item(
        &self,
        abs_root: &Path,
        root_name: &str,
        abs_path: &Path,
    ) -> Result<Option<RawItem>> {
        let metadata = match fs::metadata(abs_path) {
            Ok(metadata) => metadata,
            Err(e) => {
                // Entries that vanish mid-scan are skipped, not fatal
                eprintln!("Error processing {}: {}", abs_path.display(), e);
                return Ok(None);
            }
        };

        let rel = abs_path
            .strip_prefix(abs_root)
            .map_err(|e| crate::error!(Scanner, "{}: {}", abs_path.display(), e))?;

        let mut path = root_name.to_string();
        for component in rel.components() {
            if let Component::Normal(part) = component {
                path.push('/');
                path.push_str(&part.to_string_lossy());
            }
        }

        let name = abs_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Some(RawItem {
            relative_path: Some(path),
            name,
            size: metadata.len(),
            source: Box::new(FsContentSource::new(abs_path.to_path_buf())),
        }))
    }

    /// Check a file against the user-supplied ignore patterns; the output
    /// file itself is never processed
    pub fn should_ignore(&self, path: &Path) -> bool {
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        for pattern in &self.config.ignore_patterns {
            if glob_match(pattern, &file_name) {
                return true;
            }
        }

        path.ends_with(&self.config.output_file)
    }

    /// Check a file against the include patterns; empty means include all
    pub fn should_include(&self, path: &Path) -> bool {
        if self.config.include_patterns.is_empty() {
            return true;
        }

        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        self.config
            .include_patterns
            .iter()
            .any(|pattern| glob_match(pattern, &file_name))
    }
}
