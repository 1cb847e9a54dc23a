//! Plain-text rendering of the issue list for `issues print`.

use crate::display::clamp_lines;
use crate::tui::card::indent_columns;
use crate::view::{TaskCardView, TaskListView};

/// Column budget for wrapped description text.
pub const PRINT_WIDTH: usize = 80;
const MIN_DESCRIPTION_WIDTH: usize = 20;

fn push_card(out: &mut Vec<String>, card: &TaskCardView, cells_per_indent_unit: u16) {
    let pad = " ".repeat(indent_columns(card, cells_per_indent_unit) as usize);

    let mut head = format!("{pad}[{}] {}", card.marker, card.title);
    if let Some(priority) = &card.priority {
        head.push(' ');
        head.push_str(&priority.glyph);
    }
    out.push(head);

    if let Some(description) = &card.description {
        let width = PRINT_WIDTH.saturating_sub(pad.len() + 4).max(MIN_DESCRIPTION_WIDTH);
        for line in clamp_lines(&description.text, width, description.max_lines) {
            out.push(format!("{pad}    {line}"));
        }
    }
    if let Some(summary) = &card.dependency_summary {
        out.push(format!("{pad}    Depends on: {summary}"));
    }

    let mut meta = Vec::new();
    if let Some(status) = &card.status {
        meta.push(format!("status: {}", status.name));
    }
    if let Some(count) = card.dependency_count {
        meta.push(format!("deps: {count}"));
    }
    if !card.assignees.is_empty() {
        meta.push(format!("assignees: {}", card.assignees.join(", ")));
    }
    if let Some(duration) = &card.duration {
        meta.push(format!("estimate: {duration}"));
    }
    if let Some(start) = &card.start_date {
        meta.push(format!("start: {start}"));
    }
    if let Some(due) = &card.due_date {
        let late = if due.overdue { " (overdue)" } else { "" };
        meta.push(format!("due: {}{late}", due.text));
    }
    if card.truncated_children > 0 {
        meta.push(format!("+{} nested not shown", card.truncated_children));
    }
    if !meta.is_empty() {
        out.push(format!("{pad}    {}", meta.join(" | ")));
    }

    for child in &card.children {
        push_card(out, child, cells_per_indent_unit);
    }
}

/// Render the list view as indented text, one card per block.
pub fn render_text(view: &TaskListView, cells_per_indent_unit: u16) -> String {
    let mut out = Vec::new();
    match view {
        TaskListView::Empty(empty) => {
            out.push(format!("{} {}", empty.icon, empty.message));
        }
        TaskListView::List { header, grouping, sorting, cards, .. } => {
            out.push(format!(
                "{header}    {}: {}    {}: {}",
                grouping.label,
                grouping.selected_label(),
                sorting.label,
                sorting.selected_label()
            ));
            for card in cards {
                push_card(&mut out, card, cells_per_indent_unit);
            }
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fields::Priority;
    use crate::presenter;
    use crate::renderer::RenderContext;
    use crate::task::{Dependency, Task, TaskStatus};
    use crate::theme::Theme;

    #[test]
    fn test_render_text_tree() {
        let theme = Theme::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let ctx = RenderContext::new(&theme, now);

        let mut child = Task::new("1.1", "Write tests");
        child.priority = Some(Priority::Low);
        child.due_date = Some(now - Duration::days(3));
        let mut root = Task::new("1", "Release 1.0");
        root.status = Some(TaskStatus::new("Open", Some("#22c55e")));
        root.dependencies = Some(vec![Dependency { title: "Design".into(), status: None }]);
        root.subtasks = Some(vec![child]);

        let text = render_text(&presenter::render(&[root], &ctx), 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Issues (2)    Group by: No grouping    Sort by: Manual");
        assert_eq!(lines[1], "[T] Release 1.0");
        assert_eq!(lines[2], "    Depends on: Design");
        assert_eq!(lines[3], "    status: Open | deps: 1");
        assert_eq!(lines[4], "  [S] Write tests 🟢");
        assert!(lines[5].ends_with("(overdue)"));
    }

    #[test]
    fn test_long_description_is_clamped() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, Utc::now());
        let mut task = Task::new("1", "Chatty");
        task.description = Some("word ".repeat(100));

        let text = render_text(&presenter::render(&[task], &ctx), 2);
        let body: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(body.len(), 2);
        assert!(body[1].ends_with('…'));
        assert!(body.iter().all(|line| line.chars().count() <= PRINT_WIDTH));
    }

    #[test]
    fn test_multiline_description_is_reflowed() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, Utc::now());
        let mut task = Task::new("1", "Notes");
        task.description = Some("line one\nline two\nline three\nline four".into());

        let text = render_text(&presenter::render(&[task], &ctx), 2);
        let body: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(body, vec!["    line one line two line three line four"]);
    }

    #[test]
    fn test_render_text_empty() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, Utc::now());
        assert_eq!(render_text(&presenter::render(&[], &ctx), 2), "📋 No issues yet");
    }
}
