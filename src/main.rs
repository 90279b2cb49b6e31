//! Binary entry point for digestdeck.
//!
//! Drives a digest deck from the command line: the filesystem log store
//! under the configured data directory stands in for the page's local
//! storage.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use digestdeck::board::{Board, Page};
use digestdeck::config::DeckConfig;
use digestdeck::io::{DirectoryDownloadSink, import_feedback, load_deck};
use digestdeck::models::{Controls, FeedbackButton, LinkClick};
use digestdeck::observability::{self, LoggingConfig};
use digestdeck::tracking::{SystemClock, TracingReporter};
use digestdeck::{FilesystemLogStore, LogKind};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// File name of the feedback archive inside the data directory.
const ARCHIVE_FILENAME: &str = "web_feedback.jsonl";

type DeckBoard = Board<FilesystemLogStore, TracingReporter>;

/// Digestdeck - filter, sort and track a news digest deck.
#[derive(Parser)]
#[command(name = "digestdeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Deck file: a JSON array of cards or a digest document.
    #[arg(short, long, global = true, env = "DIGESTDECK_DECK")]
    deck: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Show the deck under the given controls.
    View {
        /// Search query.
        #[arg(short, long)]
        query: Option<String>,

        /// Only show cards referencing a repository.
        #[arg(short, long)]
        github_only: bool,

        /// Tier to show, or "all".
        #[arg(short, long)]
        tier: Option<String>,

        /// Sort mode: `score_desc` or `score_asc`.
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Record opening a card's link.
    Click {
        /// Card identifier.
        card_id: String,

        /// Link destination used when the card has none.
        #[arg(long, default_value = "")]
        href: String,
    },

    /// Record a feedback vote on a card.
    Feedback {
        /// Card identifier.
        card_id: String,

        /// Vote label, e.g. like or dislike.
        label: Option<String>,
    },

    /// Show today's clicks and total feedback.
    Counts,

    /// Save the feedback log as a JSON file.
    Export {
        /// Directory to save into.
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Import an exported feedback file into the archive.
    Import {
        /// Exported feedback JSON file.
        #[arg(short, long)]
        input: PathBuf,

        /// Archive file (default: `web_feedback.jsonl` in the data directory).
        #[arg(short, long)]
        archive: Option<PathBuf>,
    },

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(config.logging.as_ref(), cli.verbose);
    if let Err(e) = observability::init(&logging) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: DeckConfig) -> Result<(), Box<dyn std::error::Error>> {
    let deck = cli.deck;
    match cli.command {
        Commands::View {
            query,
            github_only,
            tier,
            sort,
        } => {
            let controls = Controls {
                query,
                github_only: Some(github_only),
                tier,
                sort,
            };
            cmd_view(&config, deck.as_deref(), controls)
        },
        Commands::Click { card_id, href } => cmd_click(&config, deck.as_deref(), card_id, href),
        Commands::Feedback { card_id, label } => {
            cmd_feedback(&config, deck.as_deref(), card_id, label)
        },
        Commands::Counts => cmd_counts(&config, deck.as_deref()),
        Commands::Export { out } => cmd_export(&config, deck.as_deref(), out),
        Commands::Import { input, archive } => cmd_import(&config, input, archive),
        Commands::Config { show } => cmd_config(&config, show),
    }
}

/// Loads configuration from the given path or the default location.
fn load_config(path: Option<&str>) -> Result<DeckConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => DeckConfig::load_from_file(Path::new(path))?,
        None => DeckConfig::load_default(),
    };
    Ok(config.with_env_overrides())
}

/// Mounts a board on the deck file.
fn mount_board(
    config: &DeckConfig,
    deck: Option<&Path>,
    controls: Controls,
) -> Result<DeckBoard, Box<dyn std::error::Error>> {
    let deck = deck.ok_or("no deck file given (use --deck or DIGESTDECK_DECK)")?;
    let cards = load_deck(deck)?;
    let page = Page::with_cards(cards).with_controls(controls);
    let store = FilesystemLogStore::new(&config.data_dir);

    Board::mount(page, store, TracingReporter, config)
        .ok_or_else(|| format!("deck has no cards: {}", deck.display()).into())
}

/// View command.
fn cmd_view(
    config: &DeckConfig,
    deck: Option<&Path>,
    controls: Controls,
) -> Result<(), Box<dyn std::error::Error>> {
    let board = mount_board(config, deck, controls)?;
    let view = board.controller();

    for slot in view.grid().slots() {
        let marker = if slot.visible { '*' } else { ' ' };
        let card = &slot.card;
        println!(
            "{marker} {:>7.1}  [{}] {}  ({})",
            card.score,
            card.tier,
            if card.title.is_empty() {
                card.id.as_str()
            } else {
                card.title.as_str()
            },
            card.source
        );
    }
    println!();
    println!("Visible: {}/{}", view.visible_count(), view.grid().len());
    print_counts(&board);
    Ok(())
}

/// Click command.
fn cmd_click(
    config: &DeckConfig,
    deck: Option<&Path>,
    card_id: String,
    href: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = mount_board(config, deck, Controls::new())?;
    if !board.on_link_click(&LinkClick::new(card_id.as_str(), href)) {
        return Err(format!("no card with id {card_id}").into());
    }
    println!("Recorded click on {card_id}");
    print_counts(&board);
    Ok(())
}

/// Feedback command.
fn cmd_feedback(
    config: &DeckConfig,
    deck: Option<&Path>,
    card_id: String,
    label: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = mount_board(config, deck, Controls::new())?;
    let button = FeedbackButton {
        card_id: card_id.as_str().into(),
        vote_label: label,
    };
    if board.on_feedback(&button) {
        println!("Recorded feedback on {card_id}");
    } else {
        println!("Nothing recorded (missing vote label or unknown card)");
    }
    print_counts(&board);
    Ok(())
}

/// Counts command.
fn cmd_counts(config: &DeckConfig, deck: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let board = mount_board(config, deck, Controls::new())?;
    print_counts(&board);
    Ok(())
}

/// Export command.
fn cmd_export(
    config: &DeckConfig,
    deck: Option<&Path>,
    out: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let board = mount_board(config, deck, Controls::new())?;
    let mut sink = DirectoryDownloadSink::new(&out);
    let count = board.on_export(&mut sink).ok_or("export failed")?;
    println!(
        "Exported {count} feedback events to {}",
        out.join(&config.logs.export_filename).display()
    );
    Ok(())
}

/// Import command.
fn cmd_import(
    config: &DeckConfig,
    input: PathBuf,
    archive: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let archive = archive.unwrap_or_else(|| config.data_dir.join(ARCHIVE_FILENAME));
    let reader = BufReader::new(File::open(&input)?);
    let result = import_feedback(reader, &archive, &SystemClock)?;
    println!(
        "Imported feedback events: {} (skipped {})",
        result.imported, result.skipped
    );
    Ok(())
}

/// Config command.
fn cmd_config(config: &DeckConfig, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current Configuration");
        println!("=====================");
        println!();
        println!("Data Directory: {}", config.data_dir.display());
        println!();
        println!("Event Logs:");
        println!("  Capacity: {}", config.logs.capacity);
        println!("  Click Key: {}", config.logs.click_key);
        println!("  Feedback Key: {}", config.logs.feedback_key);
        println!("  Export Filename: {}", config.logs.export_filename);
        if let Some(logging) = &config.logging {
            println!();
            println!("Logging:");
            println!("  Level: {}", logging.level.as_deref().unwrap_or("(default)"));
            println!("  Format: {}", logging.format.as_deref().unwrap_or("(default)"));
            println!("  File: {}", logging.file.as_deref().unwrap_or("(stderr)"));
        }
    } else {
        println!("Use --show to display configuration");
    }
    Ok(())
}

fn print_counts(board: &DeckBoard) {
    let logger = board.logger();
    let counts = logger.local_counts();
    println!("Today's clicks: {}", counts.today_clicks);
    println!("Total feedback: {}", counts.total_feedback);
    println!(
        "Click log: {}/{}",
        logger.records(LogKind::Click).len(),
        logger.settings().capacity
    );
}
