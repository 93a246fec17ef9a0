/*!
 * Command-line interface for codemd
 */

use std::fs;
use std::io;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use codemd::config::{Args, Config};
use codemd::report::{GenerationReport, ReportFormat, Reporter};
use codemd::scanner::Scanner;
use codemd::session::Session;
use codemd::{clipboard, Result};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Shell completion generation short-circuits everything else
    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "codemd", &mut io::stdout());
        return Ok(());
    }

    // Create and validate configuration
    let config = Config::from_args(args);
    config.validate()?;

    // Create progress bar with advanced Unicode styling
    let progress = ProgressBar::new(0);
    progress.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  Elapsed: {elapsed_precise}")
        .unwrap());
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("📊 Setup");
    progress.set_message(format!(
        "📂 Scanning directory: {}",
        config.target_dir.display()
    ));

    if config.respect_gitignore {
        progress.set_message(match &config.gitignore_path {
            Some(path) => format!("🔍 Using custom gitignore file: {}", path.display()),
            None => "🔍 Respecting .gitignore files in the project".to_string(),
        });
    }

    let scanner = Scanner::new(config.clone());

    // Count files for progress tracking
    match scanner.count_files() {
        Ok(count) => {
            progress.set_message(format!("🔎 Found {} files to process", count));
            progress.set_length(count);
        }
        Err(e) => progress.set_message(format!("⚠️ Warning: Failed to count files: {}", e)),
    }

    progress.set_prefix("📊 Processing");
    progress.set_message("Collecting files...");

    let start_time = Instant::now();

    // Collect raw items and run the pipeline; the progress bar is advanced
    // from the cooperative yield hooks
    let items = scanner.scan()?;

    let mut session = Session::new();
    session.ingest(items, &mut || progress.tick())?;

    progress.set_message(format!(
        "Generating document for {} files...",
        session.records().len()
    ));

    let document = session.generate(&mut || progress.inc(1))?.clone();

    // Write the Markdown output
    fs::write(&config.output_file, &document.markdown)?;

    // Optional flat widget-node export
    if let Some(tree_json) = &config.tree_json {
        let json = serde_json::to_string_pretty(&session.widget_nodes())?;
        fs::write(tree_json, json)?;
    }

    // Optional clipboard copy
    if config.clip {
        match clipboard::copy_to_clipboard(&document.markdown) {
            Ok(()) => progress.set_message("📋 Copied output to clipboard"),
            Err(e) => eprintln!("Warning: Failed to copy to clipboard: {}", e),
        }
    }

    let total_duration = start_time.elapsed();
    progress.finish_and_clear();

    // Prepare and print the generation report
    let stats = session.statistics();
    let report = GenerationReport {
        output_file: config.output_file.display().to_string(),
        duration: total_duration,
        files_processed: document.file_count,
        total_bytes: document.total_bytes,
        total_lines: stats.total_lines,
        total_chars: stats.total_chars,
        binary_files: stats.binary_listed,
        oversize_skipped: stats.oversize_skipped,
        file_details: stats.file_details.clone(),
    };

    let reporter = Reporter::new(ReportFormat::ConsoleTable);
    reporter.print_report(&report);

    Ok(())
}
