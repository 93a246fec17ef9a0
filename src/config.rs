/*!
 * Configuration handling for codemd
 */

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;

/// Command-line arguments for codemd
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codemd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate Markdown representation of directory contents for LLM context",
    long_about = "Creates a Markdown document from a directory: an ASCII tree of its structure followed by fenced code blocks with every text file's content, with binary files listed separately."
)]
pub struct Args {
    /// Target directory to process
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output Markdown file name
    #[clap(default_value = "project-structure.md")]
    pub output_file: String,

    /// Comma-separated list of patterns to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Comma-separated list of patterns to include (if specified, only matching files are included)
    #[clap(long, value_delimiter = ',')]
    pub include_patterns: Vec<String>,

    /// Respect .gitignore files (default: true)
    #[clap(long, default_value = "true")]
    pub respect_gitignore: bool,

    /// Path to custom .gitignore file
    #[clap(long)]
    pub gitignore_path: Option<String>,

    /// Write the interactive tree widget nodes as JSON to this file
    #[clap(long)]
    pub tree_json: Option<String>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,

    /// Copy output to clipboard
    #[clap(long, help = "Copy output to system clipboard")]
    pub clip: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Target directory to process
    pub target_dir: PathBuf,

    /// Output Markdown file path
    pub output_file: PathBuf,

    /// Patterns to ignore
    pub ignore_patterns: Vec<String>,

    /// Patterns to include (if empty, include all)
    pub include_patterns: Vec<String>,

    /// Whether to respect .gitignore files
    pub respect_gitignore: bool,

    /// Path to custom .gitignore file
    pub gitignore_path: Option<PathBuf>,

    /// Optional JSON export path for the tree widget nodes
    pub tree_json: Option<PathBuf>,

    /// Copy output to clipboard
    pub clip: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file: PathBuf::from(args.output_file),
            ignore_patterns: args.ignore_patterns,
            include_patterns: args.include_patterns,
            respect_gitignore: args.respect_gitignore,
            gitignore_path: args.gitignore_path.map(PathBuf::from),
            tree_json: args.tree_json.map(PathBuf::from),
            clip: args.clip,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.exists() && self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent.exists() || parent == Path::new(""),
                Config,
                "Output directory not found: {}",
                parent.display()
            );
        }

        if let Some(path) = &self.gitignore_path {
            ensure!(
                path.exists(),
                Config,
                "Custom .gitignore file not found: {}",
                path.display()
            );
        }

        Ok(())
    }
}
