//! Framework-agnostic visual tree.
//!
//! The renderer and presenter produce these values; a host (the terminal
//! widgets in `tui`, the plain-text printer, or anything else) draws them.

use crate::display::StatusColors;
use crate::fields::{GroupBy, SortBy};
use crate::theme::GlyphStyle;

/// Description lines are clamped to this many lines with an ellipsis.
pub const DESCRIPTION_MAX_LINES: usize = 2;

/// The three per-card action controls, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    AddSubtask,
    Edit,
    Delete,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::AddSubtask, ActionKind::Edit, ActionKind::Delete];

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::AddSubtask => "+ Subtask",
            ActionKind::Edit => "Edit",
            ActionKind::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub name: String,
    pub colors: StatusColors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDate {
    pub text: String,
    pub overdue: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub max_lines: usize,
}

/// Display model of one issue and, recursively, its subtasks.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCardView {
    pub id: String,
    pub depth: usize,
    /// Horizontal offset in display units.
    pub indent: u32,
    pub marker: String,
    pub title: String,
    pub priority: Option<GlyphStyle>,
    pub description: Option<Description>,
    pub dependency_summary: Option<String>,
    pub status: Option<StatusBadge>,
    pub dependency_count: Option<usize>,
    pub assignees: Vec<String>,
    pub duration: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<DueDate>,
    pub actions: [ActionKind; 3],
    pub children: Vec<TaskCardView>,
    /// Subtasks left out because the depth guard was reached.
    pub truncated_children: usize,
}

impl TaskCardView {
    /// Pre-order walk over this card and every descendant.
    pub fn walk(&self) -> Vec<&TaskCardView> {
        let mut out = Vec::new();
        fn visit<'a>(card: &'a TaskCardView, out: &mut Vec<&'a TaskCardView>) {
            out.push(card);
            for child in &card.children {
                visit(child, out);
            }
        }
        visit(self, &mut out);
        out
    }
}

/// A display-only dropdown in the list header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub label: &'static str,
    pub options: Vec<&'static str>,
    pub selected: usize,
}

impl Selector {
    pub fn grouping() -> Self {
        Selector {
            label: "Group by",
            options: GroupBy::ALL.iter().map(|g| g.label()).collect(),
            selected: GroupBy::ALL.iter().position(|g| *g == GroupBy::default()).unwrap_or(0),
        }
    }

    pub fn sorting() -> Self {
        Selector {
            label: "Sort by",
            options: SortBy::ALL.iter().map(|s| s.label()).collect(),
            selected: SortBy::ALL.iter().position(|s| *s == SortBy::default()).unwrap_or(0),
        }
    }

    pub fn selected_label(&self) -> &'static str {
        self.options.get(self.selected).copied().unwrap_or("-")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub icon: String,
    pub message: String,
}

/// Display model of the whole list.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskListView {
    Empty(EmptyState),
    List {
        header: String,
        total_count: usize,
        grouping: Selector,
        sorting: Selector,
        cards: Vec<TaskCardView>,
    },
}

impl TaskListView {
    /// Every card in display order (pre-order across all top-level cards).
    pub fn flatten(&self) -> Vec<&TaskCardView> {
        match self {
            TaskListView::Empty(_) => Vec::new(),
            TaskListView::List { cards, .. } => cards.iter().flat_map(|c| c.walk()).collect(),
        }
    }

    /// Like `flatten`, paired with the index path of each card, suitable for
    /// `events::dispatch`.
    pub fn flatten_with_paths(&self) -> Vec<(Vec<usize>, &TaskCardView)> {
        fn visit<'a>(
            card: &'a TaskCardView,
            path: &mut Vec<usize>,
            out: &mut Vec<(Vec<usize>, &'a TaskCardView)>,
        ) {
            out.push((path.clone(), card));
            for (i, child) in card.children.iter().enumerate() {
                path.push(i);
                visit(child, path, out);
                path.pop();
            }
        }

        let mut out = Vec::new();
        if let TaskListView::List { cards, .. } = self {
            for (i, card) in cards.iter().enumerate() {
                let mut path = vec![i];
                visit(card, &mut path, &mut out);
            }
        }
        out
    }
}
