use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use issue_tree::cli::Cli;
use issue_tree::cmd::*;
use issue_tree::config::{default_config_path, issues_dir, Config};
use issue_tree::theme::Theme;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("issue_tree=warn"))
}

/// Open `path` for appending, creating its directory first.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Log to stderr, or to `log_file` when the terminal is taken over by the viewer.
fn init_logging(log_file: Option<&Path>) {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter()).with_target(true);

    if let Some(path) = log_file {
        match open_log_file(path) {
            Ok(file) => {
                builder.with_ansi(false).with_writer(Mutex::new(file)).init();
                return;
            }
            Err(e) => eprintln!("Failed to open log file {}: {}", path.display(), e),
        }
    }
    builder.with_writer(std::io::stderr).init();
}

fn main() {
    let cli = Cli::parse();

    let log_file = match cli.command {
        Commands::Ui { .. } => Some(issues_dir().join("issues.log")),
        _ => None,
    };
    init_logging(log_file.as_deref());

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load(&config_path);
    Theme::install(config.theme.clone());

    match cli.command {
        Commands::Ui { file } => cmd_ui(&file, config),
        Commands::Print { file, now, max_depth } => cmd_print(&file, &config, now, max_depth),
        Commands::Count { file, deep } => cmd_count(&file, deep),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
