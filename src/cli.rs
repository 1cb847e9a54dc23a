use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Hierarchical issue list viewer.
/// Configuration defaults to ~/.issues/config.json or a path passed via --config.
#[derive(Parser)]
#[command(name = "issues", version, about = "Render and browse hierarchical issue lists")]
pub struct Cli {
    /// Path to the JSON config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_print_with_options() {
        let cli = Cli::try_parse_from([
            "issues", "print", "tasks.json", "--now", "2024-01-01", "--max-depth", "2", "--config", "c.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        match cli.command {
            Commands::Print { file, now, max_depth } => {
                assert_eq!(file, PathBuf::from("tasks.json"));
                assert_eq!(now.as_deref(), Some("2024-01-01"));
                assert_eq!(max_depth, Some(2));
            }
            _ => panic!("expected print"),
        }
    }
}
