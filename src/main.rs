// Terminal flashcards:
// - decks of front/back cards, stored as JSON in the data directory
// - deck list -> card list -> study, flip with Space or a click on the card
// - `flashcards list` prints the stored decks without starting the UI

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use flashcards::{
    config::{resolve_data_dir, Config, ThemeKind, DATA_ENV},
    logging::{init_logging, init_stderr_logging, Verbosity},
    store::{DeckStore, FileKv},
    tui::{self, theme_of, App},
    view::listing,
    Session,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "flashcards", about = "Flashcard study tool for the terminal", version)]
struct Cli {
    /// Data directory; defaults to $FLASHCARDS_DATA, the config file, then the platform data dir
    #[arg(long, short = 'd')]
    data_dir: Option<PathBuf>,

    /// Config file; defaults to $FLASHCARDS_CONFIG, ./flashcards.toml, then the platform config dir
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Color theme, overrides the config file
    #[arg(long, value_enum)]
    theme: Option<ThemeKind>,

    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, action = ArgAction::SetTrue)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print every deck with its card fronts
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let data_dir = resolve_data_dir(
        cli.data_dir.clone(),
        std::env::var_os(DATA_ENV).map(PathBuf::from),
        config.data_dir.clone(),
        dirs::data_dir(),
    );
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Some(Command::List) => {
            init_stderr_logging(verbosity);
            let decks = DeckStore::new(FileKv::new(&data_dir)).load();
            print!("{}", listing(&decks));
            Ok(())
        }
        None => {
            init_logging(&data_dir, verbosity)
                .with_context(|| format!("opening log in {}", data_dir.display()))?;
            let session = Session::open(FileKv::new(&data_dir));
            let theme = theme_of(cli.theme.unwrap_or(config.theme));
            let mut app = App::new(session, config.keymap(), theme);
            tui::run(&mut app)
        }
    }
}
