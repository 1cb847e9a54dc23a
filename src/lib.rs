//! # issue_tree - hierarchical issue list rendering
//!
//! Turns a tree of issues into a display model and draws it, either in an
//! interactive terminal viewer or as plain text.
//!
//! ## Key Features
//!
//! - **Derived display attributes**: status badge colours, priority glyphs, indentation,
//!   overdue due dates and dependency summaries computed from issue data
//! - **Recursive cards**: every subtask is rendered as its own card one level deeper
//! - **List presentation**: header count, display-only grouping/sorting selectors and an
//!   empty state
//! - **Callback dispatch**: edit, delete and add-subtask actions with propagation containment
//! - **Terminal viewer**: ratatui front end driving the same callbacks
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse a file of issues
//! issues ui tasks.json
//!
//! # Print the tree as text, pinned to a date
//! issues print tasks.json --now 2024-06-01
//!
//! # Header count (top-level issues plus direct subtasks)
//! issues count tasks.json
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use chrono::Utc;
//! use issue_tree::{presenter, renderer::RenderContext, store::IssueStore, theme::Theme};
//!
//! let store = IssueStore::from_json(r#"[{"id": "1", "title": "Ship it"}]"#).unwrap();
//! let ctx = RenderContext::new(Theme::global(), Utc::now());
//! let view = presenter::render(&store.tasks, &ctx);
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod fields;
pub mod presenter;
pub mod printer;
pub mod renderer;
pub mod store;
pub mod task;
pub mod theme;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod card;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod list;
    pub mod run;
    pub mod utils;
}

pub use error::{Error, Result};
pub use events::{dispatch, TaskCallbacks};
pub use task::Task;
pub use view::{TaskCardView, TaskListView};
