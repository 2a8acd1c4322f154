mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use kartei_lib::cards::{LearningFilter, SourceFilter};

#[derive(Parser)]
#[command(name = "kartei-cli", about = "Vocabulary flashcards from published sheets", version)]
struct Cli {
    /// Config file (default: ~/.config/kartei/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra source (CSV URL or path), appended after the configured ones
    #[arg(long = "source", global = true)]
    sources: Vec<String>,

    /// Restore progress and view settings from a share link
    #[arg(long, global = true)]
    restore: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// View settings shared by commands that show the displayed cards
#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    /// Sheet to show: "all" or a sheet index
    #[arg(long)]
    sheet: Option<SourceFilter>,

    /// Learned status to show: all, learned or unlearned
    #[arg(long)]
    filter: Option<LearningFilter>,

    /// Quiz in reverse (Back on the front)
    #[arg(long)]
    reverse: bool,

    /// Shuffle the displayed cards
    #[arg(long)]
    shuffle: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List configured sheets and their card counts
    Sources,

    /// List the displayed cards
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show both faces of one card
    Show {
        /// Card id (e.g. "0-3")
        id: String,
        /// Quiz in reverse (Back on the front)
        #[arg(long)]
        reverse: bool,
    },

    /// Toggle learned status of cards
    Toggle {
        /// Card ids (e.g. "0-3 1-0")
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show learned/unlearned counts
    Stats,

    /// Print a progress link, optionally saving it as a bookmark file
    Export {
        #[command(flatten)]
        view: ViewArgs,
        /// Write a .url shortcut to this file or directory
        #[arg(long)]
        bookmark: Option<PathBuf>,
    },

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    let open = || {
        app::App::new(
            cli.config.as_deref(),
            &cli.sources,
            cli.restore.as_deref(),
        )
    };

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(open()?)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::Sources) => {
            let app = open()?;
            commands::sources::run(&app, &cli.format, use_color)?;
        }
        Some(Command::List { ref view }) => {
            let mut app = open()?;
            app.apply_view(view);
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Show { ref id, reverse }) => {
            let app = open()?;
            commands::show::run(&app, id, reverse, &cli.format, use_color)?;
        }
        Some(Command::Toggle { ref ids }) => {
            let mut app = open()?;
            commands::toggle::run(&mut app, ids, &cli.format, use_color)?;
        }
        Some(Command::Stats) => {
            let app = open()?;
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Export { ref view, ref bookmark }) => {
            let mut app = open()?;
            app.apply_view(view);
            commands::export::run(&app, bookmark.as_deref(), &cli.format, use_color)?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(open()?)?;
        }
    }

    Ok(())
}
