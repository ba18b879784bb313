use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use chkrecover::recovery::{
    list_candidates, recover_directory, CandidateFilter, FileOutcome, RecoveryOptions,
    RecoveryReport, DEFAULT_EXTENSION,
};

#[derive(Parser, Debug)]
#[command(name = "chkrecover")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Renames recovered .chk fragments after their real file type")]
struct Cli {
    /// Folder holding the fragments (e.g. FOUND.000); prompted for when omitted
    folder: Option<PathBuf>,

    /// Extension of the fragments to process
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Process every file in the folder, whatever its extension
    #[arg(short, long, conflicts_with = "extension")]
    all: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Write a JSON report of every rename to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    print_banner();

    let filter = if cli.all {
        CandidateFilter::All
    } else {
        CandidateFilter::Extension(cli.extension.clone())
    };

    let folder = match cli.folder {
        Some(folder) => folder,
        None => match prompt_folder(&filter)? {
            Some(folder) => folder,
            None => {
                println!("Program terminated.");
                return Ok(());
            }
        },
    };

    if !cli.yes && !confirm_rename()? {
        println!("\nOperation cancelled.");
        return Ok(());
    }

    let options = RecoveryOptions::default().with_filter(filter);
    let report = run_recovery(&folder, &options)?;

    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_banner() {
    println!("{}", "=".repeat(60));
    println!("    {}", style("CHK FILE RECOVERY").cyan().bold());
    println!("    Restores extensions of recovered .chk fragments");
    println!("    Office documents are named after their last save");
    println!("{}", "=".repeat(60));
    println!();
}

/// Paths copied from a file manager often arrive quoted.
fn clean_path_input(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim().trim_matches('"').trim_matches('\''))
}

fn prompt_folder(filter: &CandidateFilter) -> Result<Option<PathBuf>> {
    let theme = ColorfulTheme::default();

    println!("Enter the folder containing the fragments, e.g. E:\\FOUND.000");
    println!();

    loop {
        let raw: String = Input::with_theme(&theme)
            .with_prompt("Folder path")
            .interact_text()
            .context("Failed to read folder path")?;
        let folder = clean_path_input(&raw);

        if folder.is_dir() {
            let count = list_candidates(&folder, filter)
                .with_context(|| format!("Failed to list {}", folder.display()))?
                .len();
            if count > 0 {
                println!("{} {} candidate files found.", style("✓").green(), count);
                println!();
                return Ok(Some(folder));
            }
            println!("{} No matching files in this folder.", style("[!]").yellow());
        } else {
            println!("{} Folder not found. Check the spelling and use the full path.", style("[!]").red());
        }

        let retry = Confirm::with_theme(&theme)
            .with_prompt("Try again?")
            .default(true)
            .interact()
            .context("Failed to confirm")?;
        if !retry {
            return Ok(None);
        }
    }
}

fn confirm_rename() -> Result<bool> {
    println!("{}", style("IMPORTANT:").yellow().bold());
    println!("Files will be renamed in place and this cannot be undone.");
    println!("Copy the folder first if you need a backup.");
    println!();

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Continue?")
        .default(false)
        .interact()
        .context("Failed to confirm")
}

fn run_recovery(folder: &Path, options: &RecoveryOptions) -> Result<RecoveryReport> {
    let total = list_candidates(folder, &options.filter)
        .with_context(|| format!("Failed to list {}", folder.display()))?
        .len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} Inspecting ({percent}%)")?
            .progress_chars("=>-"),
    );

    let progress_cb = |current: usize, _total: usize| {
        pb.set_position(current as u64);
    };

    let report = recover_directory(folder, options, Some(&progress_cb))
        .with_context(|| format!("Recovery failed in {}", folder.display()))?;
    pb.finish_and_clear();

    for (i, entry) in report.entries.iter().enumerate() {
        let line = match &entry.outcome {
            FileOutcome::Renamed(record) => format!("{} -> {}", style("✓").green(), record.renamed),
            FileOutcome::Unknown => format!("{} Unknown format", style("?").yellow()),
            FileOutcome::Failed { error } => format!("{} Error: {}", style("✗").red(), error),
        };
        println!("[{:>3}/{}] {} {}", i + 1, report.total, entry.original, line);
    }

    print_summary(&report);
    Ok(report)
}

fn print_summary(report: &RecoveryReport) {
    println!();
    println!("{}", "=".repeat(50));
    println!("{}", style("FINISHED").green().bold());
    println!("Recovered:        {}", style(report.recovered).green());
    println!("Unknown formats:  {}", style(report.unknown).yellow());
    println!("Errors:           {}", style(report.errors).red());
    println!("Total processed:  {}", report.total);
    println!("{}", "=".repeat(50));

    if report.recovered > 0 {
        println!("\nRecovered files are in {}", report.folder.display());
    }
}
