//! Shell completion generation command.
//!
//! Prints a completion script for bash, zsh, fish, `PowerShell` or elvish.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use route_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::Shell;
/// use route_cli::commands::completions;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut cmd = Command::new("typed-routes");
/// let result = completions::run(Shell::Bash, &mut cmd).await;
/// assert!(result.is_ok());
/// # }
/// ```
pub async fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn command() -> Command {
        Command::new("typed-routes")
            .subcommand(Command::new("generate").arg(Arg::new("output").long("output")))
            .subcommand(Command::new("watch"))
    }

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut command(), &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("typed-routes"));
        assert!(script.contains("generate"));
        assert!(script.contains("--output"));
    }

    #[test]
    fn test_every_shell_produces_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut out = Vec::new();
            write_completions(shell, &mut command(), &mut out);
            assert!(!out.is_empty(), "{shell}");
        }
    }
}
