//! Command implementations for the CLI interface.
//!
//! Each handler loads what it needs, reports failures on stderr and exits
//! with status 1, so `main` stays a plain dispatch.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::config::Config;
use crate::presenter;
use crate::printer::render_text;
use crate::renderer::RenderContext;
use crate::store::IssueStore;
use crate::task::parse_timestamp;
use crate::theme::Theme;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Browse an issue file in the interactive viewer.
    Ui {
        /// JSON issue file.
        file: PathBuf,
    },

    /// Print an issue file as an indented tree.
    Print {
        /// JSON issue file.
        file: PathBuf,
        /// Render as of this time (RFC 3339 or YYYY-MM-DD) instead of now.
        #[arg(long)]
        now: Option<String>,
        /// Do not render subtasks nested deeper than this.
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Print the header count: top-level issues plus their direct subtasks.
    Count {
        /// JSON issue file.
        file: PathBuf,
        /// Also print the number of issues at every depth.
        #[arg(long)]
        deep: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn load_or_exit(file: &Path) -> IssueStore {
    match IssueStore::load(file) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Launch the terminal user interface.
pub fn cmd_ui(file: &Path, config: Config) {
    let store = load_or_exit(file);
    info!(file = %file.display(), "starting viewer");
    if let Err(e) = run_tui(store, config) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Print the rendered list to stdout.
pub fn cmd_print(file: &Path, config: &Config, now: Option<String>, max_depth: Option<usize>) {
    let store = load_or_exit(file);

    let now: DateTime<Utc> = match now.as_deref() {
        None => Utc::now(),
        Some(raw) => match parse_timestamp(raw) {
            Some(ts) => ts,
            None => {
                eprintln!("Invalid --now value '{raw}'. Use RFC 3339 or YYYY-MM-DD.");
                std::process::exit(1);
            }
        },
    };

    let mut ctx = RenderContext::from_config(Theme::global(), config, now);
    if let Some(depth) = max_depth {
        ctx.max_depth = depth;
    }
    let view = presenter::render(&store.tasks, &ctx);
    println!("{}", render_text(&view, config.cells_per_indent_unit));
}

/// Print the shallow header count, and optionally the deep count.
pub fn cmd_count(file: &Path, deep: bool) {
    let store = load_or_exit(file);
    println!("{}", presenter::total_count(&store.tasks));
    if deep {
        println!("{} (all depths)", store.len_deep());
    }
}

pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
