//! docxpack CLI - Word document XML packing tool
//!
//! A command-line front end that packs a folder of Office Open XML parts into
//! a `.docx` and unpacks a `.docx` back into its XML tree.

use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use docxpack::{Compression, PackOptions};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Pack and unpack the XML parts of Word documents
#[derive(Parser)]
#[command(
    name = "docxpack",
    author = "iyulab",
    version,
    about = "Pack and unpack Word document XML",
    long_about = "docxpack - Convert between a folder of Office Open XML parts and a .docx file.\n\n\
                  Unpack a document, edit its XML by hand, and pack it again."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a folder has the required Word XML parts
    Validate {
        /// Folder to check
        folder: PathBuf,
    },

    /// Pack a folder into a .docx file
    Pack {
        /// Folder containing the unpacked document
        folder: PathBuf,

        /// Output file path (default: <FOLDER>/converted.docx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Store entries without compression
        #[arg(long)]
        stored: bool,

        /// Skip the required-parts check
        #[arg(long)]
        no_validate: bool,

        /// Open the result with the default application
        #[arg(long)]
        open: bool,
    },

    /// Unpack a .docx file into a folder
    Unpack {
        /// Input .docx file
        input: PathBuf,

        /// Output folder (default: input path without extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the entries of a .docx file
    #[command(visible_alias = "ls")]
    List {
        /// Input .docx file
        input: PathBuf,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        if let Some(step) = failed_step(e.as_ref()) {
            eprintln!("{}: {}", "Failed step".yellow(), step);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Validate { folder } => {
            docxpack::validate_structure(&folder)?;
            println!(
                "{} Valid Word XML structure: {}",
                "✓".green().bold(),
                folder.display()
            );
        }

        Commands::Pack {
            folder,
            output,
            stored,
            no_validate,
            open: open_after,
        } => {
            let output = output.unwrap_or_else(|| folder.join("converted.docx"));

            let mut options = PackOptions::new();
            if stored {
                options = options.with_compression(Compression::Stored);
            }
            if open_after {
                options = options.with_on_packed(|path| open::that(path));
            }

            let pb = create_spinner("Packing folder...");
            let result = if no_validate {
                docxpack::pack_with_options(&folder, &output, &options)
            } else {
                docxpack::pack_validated(&folder, &output, &options)
            };
            pb.finish_and_clear();
            let summary = result?;

            println!(
                "{} DOCX created: {} ({} parts, {})",
                "✓".green().bold(),
                summary.destination.display(),
                summary.entries.len(),
                format_size(summary.total_bytes)
            );
        }

        Commands::Unpack { input, output } => {
            let output = output.unwrap_or_else(|| default_unpack_dir(&input));

            let pb = create_spinner("Unpacking document...");
            let result = docxpack::unpack(&input, &output);
            pb.finish_and_clear();
            let summary = result?;

            println!(
                "{} Unpacked {} files to {}",
                "✓".green().bold(),
                summary.files,
                summary.destination.display()
            );
            if !docxpack::is_valid_structure(&output) {
                println!(
                    "{} Extracted folder lacks the Word XML skeleton",
                    "!".yellow().bold()
                );
            }
        }

        Commands::List { input, json } => {
            let entries = docxpack::list_entries(&input)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{:>10}  {:>10}  {:<9}  Name", "Length", "Size", "Method");
                println!("{}", "─".repeat(60));
                let mut total = 0u64;
                for entry in &entries {
                    println!(
                        "{:>10}  {:>10}  {:<9}  {}",
                        entry.size, entry.compressed_size, entry.compression, entry.name
                    );
                    total += entry.size;
                }
                println!("{}", "─".repeat(60));
                println!("{:>10}  {:>10}  {:<9}  {} entries", total, "", "", entries.len());
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// The pack/unpack step behind an I/O failure, if any.
fn failed_step(err: &(dyn std::error::Error + 'static)) -> Option<docxpack::Step> {
    err.downcast_ref::<docxpack::Error>()
        .and_then(docxpack::Error::step)
}

/// `report.docx` unpacks into `report`; extensionless input gets a suffix.
fn default_unpack_dir(input: &Path) -> PathBuf {
    if input.extension().is_some() {
        input.with_extension("")
    } else {
        let mut name = input.file_name().unwrap_or_default().to_os_string();
        name.push("_unpacked");
        input.with_file_name(name)
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}

fn print_version() {
    println!("{} {}", "docxpack".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Pack and unpack the XML parts of Word documents");
    println!();
    println!("Required parts: {}", docxpack::REQUIRED_MEMBERS.join(", "));
    println!("Repository: https://github.com/iyulab/docxpack");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
