//! undocx CLI - DOCX table extraction tool

mod upload;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use undocx::{
    collect_references, CommandConverter, DirectoryUploader, DocxParser, ErrorMode,
    ExtractOptions, ExtractedDocument, Extractor, JsonFormat, ParseOptions, ResolutionPolicy,
    UploadKeyStrategy,
};

use upload::HttpUploader;

#[derive(Parser)]
#[command(name = "undocx")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract DOCX tables with resolved equations and images", long_about = None)]
struct Cli {
    /// Input DOCX file (prints JSON when no command is given)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    resolve: ResolveArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options controlling equation and image resolution.
#[derive(Args, Debug, Default)]
struct ResolveArgs {
    /// Store images in this directory
    #[arg(long, global = true, value_name = "DIR", env = "UNDOCX_UPLOAD_DIR")]
    upload_dir: Option<PathBuf>,

    /// Upload images with HTTP PUT under this base URL
    #[arg(
        long,
        global = true,
        value_name = "URL",
        env = "UNDOCX_UPLOAD_URL",
        conflicts_with = "upload_dir"
    )]
    upload_url: Option<String>,

    /// Prefix of the image URIs written into cells
    #[arg(long, global = true, value_name = "PREFIX", env = "UNDOCX_URL_PREFIX")]
    url_prefix: Option<String>,

    /// Command converting an equation object (on stdin) to LaTeX (on stdout)
    #[arg(long, global = true, value_name = "CMD", env = "UNDOCX_EQUATION_CMD")]
    equation_cmd: Option<String>,

    /// How image upload keys are generated
    #[arg(long, global = true, value_enum, default_value = "random")]
    key_strategy: KeyStrategy,

    /// Fail when any equation or image cannot be resolved
    #[arg(long, global = true)]
    fail_fast: bool,

    /// Text rendered in place of unresolved objects
    #[arg(long, global = true, value_name = "TEXT", default_value = "")]
    placeholder: String,

    /// Do not use the thread pool
    #[arg(long, global = true)]
    sequential: bool,

    /// Continue when a referenced part is missing from the package
    #[arg(long, global = true)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract tables as JSON
    Json {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract tables as tab-separated text
    Text {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the HTML rendering of each cell instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Show document information
    Info {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Write embedded images and equation objects to a directory
    Media {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum KeyStrategy {
    /// Random UUID per image
    #[default]
    Random,
    /// MD5 digest of the image bytes
    Hash,
}

impl From<KeyStrategy> for UploadKeyStrategy {
    fn from(strategy: KeyStrategy) -> Self {
        match strategy {
            KeyStrategy::Random => UploadKeyStrategy::Random,
            KeyStrategy::Hash => UploadKeyStrategy::ContentHash,
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let resolve = cli.resolve;

    let result = match cli.command {
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &resolve),
        Some(Commands::Text {
            input,
            output,
            html,
        }) => cmd_text(&input, output.as_deref(), html, &resolve),
        Some(Commands::Info { input }) => cmd_info(&input, &resolve),
        Some(Commands::Media { input, output }) => cmd_media(&input, output.as_deref(), &resolve),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_json(&input, None, false, &resolve)
            } else {
                println!("{}", "Usage: undocx <FILE>".yellow());
                println!("       undocx --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_options(args: &ResolveArgs) -> ParseOptions {
    if args.lenient {
        ParseOptions::new().with_error_mode(ErrorMode::Lenient)
    } else {
        ParseOptions::new()
    }
}

fn build_extractor(args: &ResolveArgs) -> CliResult<Extractor> {
    let mut options = ExtractOptions::new()
        .with_parse_options(parse_options(args))
        .with_key_strategy(args.key_strategy.into())
        .with_placeholder(args.placeholder.clone());
    if args.fail_fast {
        options = options.with_policy(ResolutionPolicy::FailFast);
    }
    if args.sequential {
        options = options.sequential();
    }

    let mut extractor = Extractor::new().with_options(options);

    if let Some(command) = &args.equation_cmd {
        extractor = extractor.with_converter(CommandConverter::from_command_line(command)?);
    }

    if let Some(dir) = &args.upload_dir {
        let prefix = args
            .url_prefix
            .clone()
            .unwrap_or_else(|| format!("{}/", dir.display()));
        extractor = extractor.with_uploader(DirectoryUploader::new(dir)?.with_url_prefix(prefix));
    } else if let Some(url) = &args.upload_url {
        extractor = extractor
            .with_uploader(HttpUploader::new(url)?.with_public_prefix(args.url_prefix.clone()));
    }

    Ok(extractor)
}

fn extract(input: &Path, args: &ResolveArgs, show_progress: bool) -> CliResult<ExtractedDocument> {
    let extractor = build_extractor(args)?;

    let spinner = show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Extracting {}...", input.display()));
        pb
    });

    let doc = extractor.extract_file(input);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let doc = doc?;

    for failure in &doc.report.failures {
        eprintln!(
            "{} could not resolve {} {}: {}",
            "Warning:".yellow().bold(),
            failure.kind,
            failure.id,
            failure.message
        );
    }

    Ok(doc)
}

fn write_output(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &ResolveArgs,
) -> CliResult<()> {
    let doc = extract(input, args, output.is_some())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    write_output(output, &doc.to_json(format)?)
}

fn cmd_text(input: &Path, output: Option<&Path>, html: bool, args: &ResolveArgs) -> CliResult<()> {
    let doc = extract(input, args, output.is_some())?;

    let text = if html {
        render_html_rows(&doc)
    } else {
        doc.plain_text()
    };

    write_output(output, &text)
}

fn render_html_rows(doc: &ExtractedDocument) -> String {
    doc.tables
        .iter()
        .map(|table| {
            table
                .rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|c| c.html.as_str())
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn cmd_info(input: &Path, args: &ResolveArgs) -> CliResult<()> {
    let doc = DocxParser::open_with_options(input, parse_options(args).lenient())?.parse()?;
    let refs = collect_references(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref creator) = doc.metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref modified_by) = doc.metadata.last_modified_by {
        println!("{}: {}", "Last modified by".bold(), modified_by);
    }

    println!();
    println!("{}", "Table Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let rows: usize = doc.tables.iter().map(|t| t.row_count()).sum();
    println!("{}: {}", "Tables".bold(), doc.table_count());
    println!("{}: {}", "Rows".bold(), rows);
    println!("{}: {}", "Cells".bold(), doc.cell_count());
    println!("{}: {}", "Equations".bold(), refs.equations.len());
    println!("{}: {}", "Images".bold(), refs.images.len());

    Ok(())
}

fn cmd_media(input: &Path, output: Option<&Path>, args: &ResolveArgs) -> CliResult<()> {
    let doc = DocxParser::open_with_options(input, parse_options(args))?.parse()?;
    let refs = collect_references(&doc);

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let mut count = 0;
    for reference in refs.equations.iter().chain(&refs.images) {
        let Some(data) = doc.part(&reference.part) else {
            log::warn!("Part {} is not loaded; skipped", reference.part);
            continue;
        };
        let filename = reference
            .part
            .rsplit('/')
            .next()
            .unwrap_or(reference.part.as_str());
        fs::write(output_dir.join(filename), data)?;
        println!("{} {} ({})", "Extracted".green(), filename, reference.id);
        count += 1;
    }

    println!("\n{} {} objects extracted", "Done!".green().bold(), count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "undocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX table extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/undocx".dimmed());
    println!("License: MIT");
}
