/// OBML command-line tool: inspect, validate and take apart `.obml` page
/// files.
///
/// # Command overview
///
/// ```text
/// obml <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect         Print an outline of the decoded document
///   validate        Check a file for structural correctness
///   links           List links, or hit-test a point
///   paint           Print the display list a renderer would receive
///   extract-images  Write every embedded image to a directory
///   stats           Print size and content statistics
///   help            Print help information
///
/// Global options:
///   -v, --verbose    More log output (-v debug, -vv trace)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                    |
/// |------|--------------------------------------------|
/// | 0    | Success                                    |
/// | 1    | Error (unreadable file, decode failure...) |
///
/// Errors and log output go to stderr so stdout can be piped cleanly.
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use obml_decoder::{DecoderConfig, ObmlDecoder, PartialDecode};
use obml_types::{Document, TileKind};

mod cmd_extract;
mod cmd_inspect;
mod cmd_links;
mod cmd_paint;
mod cmd_stats;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The OBML page-file tool.
#[derive(Parser)]
#[command(name = "obml", version, about = "OBML page file tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decode stages (-v) or every record (-vv) to stderr.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print an outline of the decoded document.
    Inspect(InspectArgs),
    /// Check a file for structural correctness.
    Validate(ValidateArgs),
    /// List links, or find the link under a point.
    Links(LinksArgs),
    /// Print the display list a renderer would receive.
    Paint(PaintArgs),
    /// Write every embedded image to a directory.
    ExtractImages(ExtractArgs),
    /// Print size and content statistics.
    Stats(StatsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `obml inspect`.
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                                │
/// ├──────────────┼───────────────────────────────────────────────────────┤
/// │ --json       │ Print the document as JSON instead of an outline      │
/// │ --include K  │ Only show tiles of these kinds (block,image,text,form)│
/// │ --tile N     │ Show only the tile at index N, with its raw fields    │
/// └──────────────┴───────────────────────────────────────────────────────┘
/// ```
///
/// A file that fails to decode is still printed as far as it was read,
/// then the command exits with the decode error.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the `.obml` file.
    pub file: PathBuf,

    /// Print JSON instead of the text outline.
    #[arg(long)]
    pub json: bool,

    /// Comma-separated tile kinds to show.
    #[arg(long, value_delimiter = ',', value_parser = parse_kind)]
    pub include: Option<Vec<TileKind>>,

    /// Show only the tile at this zero-based index.
    #[arg(long, conflicts_with = "json")]
    pub tile: Option<usize>,
}

/// Arguments for `obml validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the `.obml` file.
    pub file: PathBuf,

    /// Also decode every embedded image into pixels. Needs the `raster`
    /// feature.
    #[arg(long)]
    pub decode_images: bool,
}

/// Arguments for `obml links`.
///
/// Without `--at`, lists every link. With `--at X,Y`, prints the link a
/// tap at that page position would follow, using the same rules as the
/// viewer: file order, first containing region wins, links without a
/// target type are ignored.
#[derive(clap::Args)]
pub struct LinksArgs {
    /// Path to the `.obml` file.
    pub file: PathBuf,

    /// Page position to hit-test, as `X,Y`.
    #[arg(long, value_parser = parse_point)]
    pub at: Option<(f32, f32)>,

    /// Also list links without a target type.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for `obml paint`.
#[derive(clap::Args)]
pub struct PaintArgs {
    /// Path to the `.obml` file.
    pub file: PathBuf,

    /// Surface height limit in pixels.
    #[arg(long, default_value_t = 16384)]
    pub max_height: u32,

    /// Multiply every font size by this factor.
    #[arg(long, default_value_t = 1.0)]
    pub font_scale: f32,

    /// Comma-separated tile kinds to paint.
    #[arg(long, value_delimiter = ',', value_parser = parse_kind)]
    pub include: Option<Vec<TileKind>>,
}

/// Arguments for `obml extract-images`.
///
/// Files are named after the image's address, with an extension guessed
/// from its leading bytes: `00012c.jpeg`, `0004f1.png`.
#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the `.obml` file.
    pub file: PathBuf,

    /// Output directory, created if missing.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for `obml stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the `.obml` file.
    pub file: PathBuf,
}

// ── Shared helpers ────────────────────────────────────────────────────────────

fn parse_kind(s: &str) -> Result<TileKind, String> {
    TileKind::from_name(s).ok_or_else(|| {
        format!("unknown tile kind {s:?} (expected block, image, text or form)")
    })
}

fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok((x, y))
}

/// Decode `path` with the default configuration, keeping a failed decode's
/// partial document.
fn load(path: &Path) -> std::result::Result<Document, PartialDecode> {
    load_with(path, DecoderConfig::default())
}

fn load_with(path: &Path, config: DecoderConfig) -> std::result::Result<Document, PartialDecode> {
    ObmlDecoder::new(config).parse_file(path)
}

/// Decode `path`, failing on any decode error.
fn load_strict(path: &Path) -> Result<Document> {
    Ok(load(path)?)
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.format_timestamp(None).init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Links(args) => cmd_links::run(&args),
        Commands::Paint(args) => cmd_paint::run(&args),
        Commands::ExtractImages(args) => cmd_extract::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
