mod app;
mod cli;
mod commands;
mod config;
mod controller;
mod deck;
mod keymap;
mod logging;
mod render;
mod theme;
mod toc;
mod ui;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose, cli.quiet, !cli.no_color);

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
