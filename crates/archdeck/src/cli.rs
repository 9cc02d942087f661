use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app::LaunchOptions;
use crate::deck::SlideStore;

#[derive(Parser)]
#[command(name = "archdeck")]
#[command(author, version, about)]
#[command(long_about = "A slide deck presenter for a talk on frontend architecture.\n\n\
    Without a deck file the built-in deck is presented.\n\n\
    Examples:\n  \
    archdeck                     Present the built-in deck (fullscreen)\n  \
    archdeck --windowed          Present in a window\n  \
    archdeck talk.yaml --slide 5 Present a deck file from slide 5\n  \
    archdeck toc                 Print the table of contents")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to present (YAML). Defaults to the built-in deck.
    pub deck: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Start in grid overview mode
    #[arg(long, global = false)]
    pub overview: bool,

    /// Slide transition: slide, push, fade or none
    #[arg(long, global = false, value_parser = ["slide", "push", "fade", "none"])]
    pub transition: Option<String>,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the table of contents grouped by section
    Toc {
        /// Deck file (YAML). Defaults to the built-in deck.
        deck: Option<PathBuf>,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.transition, defaults.start_mode)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Toc { deck }) => crate::commands::toc::run(deck.as_deref()),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                let store = SlideStore::load_or_builtin(self.deck.as_deref())?;
                crate::app::run(
                    store,
                    LaunchOptions {
                        windowed: self.windowed,
                        slide: self.slide,
                        overview: self.overview,
                        transition: self.transition,
                    },
                )
            }
        }
    }
}
