use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let not_set = "(not set)".dimmed().to_string();
    let value = |v: Option<String>| v.map(|s| s.green().to_string()).unwrap_or_else(|| not_set.clone());

    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    println!("{}", "defaults".bold());
    println!("  theme:      {}", value(config.theme().map(str::to_string)));
    println!("  transition: {}", value(config.transition().map(str::to_string)));
    println!(
        "  start_mode: {}",
        value(
            config
                .defaults
                .as_ref()
                .and_then(|d| d.start_mode.clone())
        )
    );
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    tracing::info!(key, value, "config updated");
    println!(
        "{} {} = {} ({})",
        "Set".green().bold(),
        key,
        value,
        path.display().to_string().dimmed()
    );
    Ok(())
}
