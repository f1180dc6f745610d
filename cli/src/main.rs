//! unsection CLI - split structured documents into Markdown section files

mod source;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use source::DirectorySource;
use unsection::acquire::BatchProgress;
use unsection::convert::{convert_batch, ConversionStats};
use unsection::render::to_json;
use unsection::segment::Flattener;
use unsection::{
    AcquireConfig, AcquisitionSelector, CleanupPreset, ConvertResult, DocumentRef, JsonFormat,
    OutputSet, RenderOptions, Unsection,
};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "unsection")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Split structured documents into Markdown section files", long_about = None)]
struct Cli {
    /// Input document (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON document into one Markdown file per section
    Convert {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert a plain-text or HTML export (no heading structure)
    Text {
        /// Input text or HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Document title (defaults to the file name)
        #[arg(short, long)]
        title: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert every JSON document in a directory
    Batch {
        /// Collection directory (members listed by index.json, or every *.json file)
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Only use index.json for listing
        #[arg(long)]
        no_fallback_listing: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the sections of a JSON document as JSON
    Sections {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Default)]
struct RenderArgs {
    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Include YAML frontmatter
    #[arg(short, long)]
    frontmatter: bool,

    /// Omit the provenance footer
    #[arg(long)]
    no_footer: bool,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Maximum heading level (1-6)
    #[arg(long, default_value = "6")]
    max_heading: u8,

    /// Render sections on one thread
    #[arg(long)]
    sequential: bool,
}

impl RenderArgs {
    fn builder(&self) -> Unsection {
        let mut builder = Unsection::new()
            .with_footer(!self.no_footer)
            .with_max_heading(self.max_heading);
        if self.frontmatter {
            builder = builder.with_frontmatter();
        }
        if let Some(level) = self.cleanup {
            builder = builder.with_cleanup(level.into());
        }
        if self.sequential {
            builder = builder.sequential();
        }
        builder
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (blank-line collapsing only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup (Unicode normalization, ligatures)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert { input, render }) => cmd_convert(&input, &render),
        Some(Commands::Text {
            input,
            title,
            render,
        }) => cmd_text(&input, title.as_deref(), &render),
        Some(Commands::Batch {
            input,
            no_fallback_listing,
            render,
        }) => cmd_batch(&input, !no_fallback_listing, &render),
        Some(Commands::Sections {
            input,
            output,
            compact,
        }) => cmd_sections(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                let render = RenderArgs {
                    output: cli.output,
                    cleanup: cli.cleanup,
                    max_heading: 6,
                    ..RenderArgs::default()
                };
                cmd_convert(&input, &render)
            } else {
                println!("{}", "Usage: unsection <FILE.json> [OUTPUT]".yellow());
                println!("       unsection --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Map library errors to their user-facing message.
fn friendly(err: unsection::Error) -> Box<dyn std::error::Error> {
    err.user_message().into()
}

fn default_output_dir(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .or_else(|| input.file_name())
        .unwrap_or_default()
        .to_string_lossy();
    PathBuf::from(format!("{}_{}", stem, suffix))
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb
}

fn cmd_convert(input: &Path, render: &RenderArgs) -> CmdResult {
    let output_dir = render
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(input, "sections"));

    let pb = spinner("Reading document...");
    let (source, id) = DirectorySource::for_file(input);
    let selector = AcquisitionSelector::new(Arc::new(source), AcquireConfig::default());
    let reference = DocumentRef::new(id, default_title(input));

    pb.set_message("Segmenting...");
    let result = render
        .builder()
        .convert_acquired(&selector, &reference)
        .map_err(friendly)?;
    pb.finish_with_message("Done!");

    write_output(&output_dir, &result.output)?;
    print_summary(&output_dir, &result);
    Ok(())
}

fn cmd_text(input: &Path, title: Option<&str>, render: &RenderArgs) -> CmdResult {
    let output_dir = render
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(input, "sections"));

    let (source, id) = DirectorySource::for_file(input);
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| default_title(input));
    let selector = AcquisitionSelector::new(Arc::new(source), AcquireConfig::degraded());

    let result = render
        .builder()
        .convert_acquired(&selector, &DocumentRef::new(id, title))
        .map_err(friendly)?;

    write_output(&output_dir, &result.output)?;
    print_summary(&output_dir, &result);
    Ok(())
}

fn default_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled Document".to_string())
}

/// Drives an indicatif bar from batch events.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }
}

impl BatchProgress for BarProgress {
    fn on_batch_start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_member_start(&self, _index: usize, _total: usize, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn on_member_complete(&self, _index: usize, _total: usize, _name: &str) {
        self.bar.inc(1);
    }

    fn on_member_error(&self, _index: usize, _total: usize, name: &str, error: &str) {
        self.bar
            .println(format!("{} {}: {}", "Failed".red(), name, error));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total: usize, succeeded: usize) {
        self.bar
            .finish_with_message(format!("{}/{} documents", succeeded, total));
    }
}

fn cmd_batch(input: &Path, listing_fallback: bool, render: &RenderArgs) -> CmdResult {
    let output_dir = render
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(input, "batch"));

    let source = Arc::new(DirectorySource::new(input));
    let config = AcquireConfig::default().with_listing_fallback(listing_fallback);
    let selector = AcquisitionSelector::new(source.clone(), config);
    let options = render.builder().options().clone();

    let progress = BarProgress::new();
    let result = convert_batch(&selector, source.as_ref(), ".", &options, &progress)
        .map_err(friendly)?;

    write_output(&output_dir, &result.output)?;
    print_summary(&output_dir, &result);
    if result.stats.failed_document_count > 0 {
        println!(
            "{} {} documents failed (see error sections)",
            "Warning:".yellow().bold(),
            result.stats.failed_document_count
        );
    }
    Ok(())
}

fn read_document(input: &Path) -> Result<unsection::Document, Box<dyn std::error::Error>> {
    let (source, id) = DirectorySource::for_file(input);
    let selector = AcquisitionSelector::new(Arc::new(source), AcquireConfig::default());
    let acquired = selector
        .acquire(&DocumentRef::new(id, default_title(input)))
        .map_err(friendly)?;
    Ok(acquired.document)
}

fn cmd_sections(input: &Path, output: Option<&Path>, compact: bool) -> CmdResult {
    let doc = read_document(input)?;
    let sections = Flattener::new(RenderOptions::default()).flatten(&doc, None);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&sections, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> CmdResult {
    let doc = read_document(input)?;
    let sections = Flattener::new(RenderOptions::default()).flatten(&doc, None);
    let mut stats = ConversionStats::from_document(&doc);
    stats.count_sections(&sections);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), doc.title().unwrap_or("(untitled)"));
    println!(
        "{}: {}",
        "Layout".bold(),
        if doc.tabs().is_some() { "Tabbed" } else { "Single body" }
    );
    if let Some(ref id) = doc.metadata.id {
        println!("{}: {}", "Id".bold(), id);
    }
    if let Some(ref revision) = doc.metadata.revision_id {
        println!("{}: {}", "Revision".bold(), revision);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sub-documents".bold(), stats.subdocument_count);
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn write_output(output_dir: &Path, output: &OutputSet) -> CmdResult {
    output.write_to(output_dir).map_err(friendly)?;
    Ok(())
}

fn print_summary(output_dir: &Path, result: &ConvertResult) {
    println!("\n{} {}", "Output files:".green().bold(), output_dir.display());
    let count = result.output.files.len();
    for (i, file) in result.output.files.iter().enumerate() {
        let branch = if i + 1 == count { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), file.name);
    }

    for name in &result.output.collisions {
        println!(
            "{} '{}' was produced more than once; later sections overwrite earlier ones",
            "Warning:".yellow().bold(),
            name
        );
    }

    println!(
        "\n{} sections, {} words",
        result.stats.section_count, result.stats.word_count
    );
}

fn cmd_version() {
    println!("{} {}", "unsection".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Structured document to Markdown section splitter");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unsection".dimmed());
    println!("License: MIT");
}
