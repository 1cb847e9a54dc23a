//! List-level presentation.
//!
//! Builds the header, the display-only selectors and one card per top-level
//! issue, or the empty-state placeholder when there are no issues.

use crate::renderer::{self, RenderContext};
use crate::task::Task;
use crate::view::{EmptyState, Selector, TaskListView};

/// Header count: every top-level issue plus its direct subtasks.
///
/// Grandchildren and deeper descendants are not counted even though they are
/// rendered.
pub fn total_count(tasks: &[Task]) -> usize {
    tasks.iter().map(|t| 1 + t.subtasks().len()).sum()
}

pub fn header(total: usize) -> String {
    format!("Issues ({total})")
}

/// Render the list of top-level issues.
pub fn render(tasks: &[Task], ctx: &RenderContext<'_>) -> TaskListView {
    if tasks.is_empty() {
        return TaskListView::Empty(EmptyState {
            icon: ctx.theme.empty_icon.clone(),
            message: ctx.theme.empty_message.clone(),
        });
    }

    let total = total_count(tasks);
    TaskListView::List {
        header: header(total),
        total_count: total,
        grouping: Selector::grouping(),
        sorting: Selector::sorting(),
        cards: tasks.iter().map(|t| renderer::render(t, 0, ctx)).collect(),
    }
}
