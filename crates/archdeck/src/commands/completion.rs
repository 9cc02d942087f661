use clap::CommandFactory;
use clap_complete::Shell as ClapShell;

use crate::cli::{Cli, Shell};

/// Print a completion script for `shell` to stdout.
pub fn run(shell: Shell) {
    let shell = match shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::Powershell => ClapShell::PowerShell,
    };

    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "archdeck", &mut std::io::stdout());
}
