//! Per-issue card rendering.
//!
//! `render` turns one issue and its nesting depth into a `TaskCardView`,
//! descending into subtasks at `depth + 1` in order. The walk is a pure
//! pre-order traversal of the borrowed tree.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::display::{
    dependency_summary, format_duration, format_short_date, indent, is_overdue, priority_style,
    status_colors, type_marker,
};
use crate::task::Task;
use crate::theme::Theme;
use crate::view::{ActionKind, Description, DueDate, StatusBadge, TaskCardView, DESCRIPTION_MAX_LINES};

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Everything a render pass reads besides the issues themselves.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    /// Render time, used for the overdue flag.
    pub now: DateTime<Utc>,
    pub date_format: &'a str,
    /// Cards at this depth are rendered without their subtasks.
    pub max_depth: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, now: DateTime<Utc>) -> Self {
        RenderContext {
            theme,
            now,
            date_format: DEFAULT_DATE_FORMAT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn from_config(theme: &'a Theme, config: &'a Config, now: DateTime<Utc>) -> Self {
        RenderContext {
            theme,
            now,
            date_format: &config.date_format,
            max_depth: config.max_depth,
        }
    }
}

/// Render an issue at `depth` together with all of its subtasks.
pub fn render(task: &Task, depth: usize, ctx: &RenderContext<'_>) -> TaskCardView {
    let theme = ctx.theme;
    let deps = task.dependencies();

    let due_date = task.due_date.map(|due| {
        let overdue = is_overdue(due, ctx.now);
        DueDate {
            text: format_short_date(due, ctx.date_format),
            overdue,
            color: if overdue { theme.due_overdue.clone() } else { theme.due_normal.clone() },
        }
    });

    let (children, truncated_children) = if depth >= ctx.max_depth {
        (Vec::new(), task.subtasks().len())
    } else {
        let children = task
            .subtasks()
            .iter()
            .map(|sub| render(sub, depth + 1, ctx))
            .collect();
        (children, 0)
    };

    TaskCardView {
        id: task.id.clone(),
        depth,
        indent: indent(depth),
        marker: type_marker(depth, theme).to_string(),
        title: task.title.clone(),
        priority: task
            .priority
            .as_ref()
            .map(|p| priority_style(Some(p), theme).clone()),
        description: task.description.as_ref().map(|text| Description {
            text: text.clone(),
            max_lines: DESCRIPTION_MAX_LINES,
        }),
        dependency_summary: dependency_summary(deps),
        status: task.status.as_ref().map(|s| StatusBadge {
            name: s.name.clone(),
            colors: status_colors(Some(s), theme),
        }),
        dependency_count: (!deps.is_empty()).then_some(deps.len()),
        assignees: task.assignees().iter().map(|a| a.name.clone()).collect(),
        duration: task.duration.map(format_duration),
        start_date: task.start_date.map(|d| format_short_date(d, ctx.date_format)),
        due_date,
        actions: ActionKind::ALL,
        children,
        truncated_children,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fields::Priority;
    use crate::task::{Assignee, Dependency, TaskStatus};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_bare_task_omits_optional_elements() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, now());
        let card = render(&Task::new("1", "Plain"), 0, &ctx);

        assert_eq!(card.marker, "T");
        assert_eq!(card.indent, 0);
        assert_eq!(card.priority, None);
        assert_eq!(card.description, None);
        assert_eq!(card.dependency_summary, None);
        assert_eq!(card.status, None);
        assert_eq!(card.dependency_count, None);
        assert!(card.assignees.is_empty());
        assert_eq!(card.duration, None);
        assert_eq!(card.start_date, None);
        assert_eq!(card.due_date, None);
        assert_eq!(card.actions, ActionKind::ALL);
        assert!(card.children.is_empty());
    }

    #[test]
    fn test_full_task_attributes() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, now());
        let mut task = Task::new("7", "Payments");
        task.description = Some("Wire up the payment provider".into());
        task.status = Some(TaskStatus::new("Blocked", Some("#dc2626")));
        task.priority = Some(Priority::High);
        task.dependencies = Some(vec![
            Dependency { title: "A".into(), status: Some(TaskStatus::new("Done", None)) },
            Dependency { title: "B".into(), status: None },
        ]);
        task.assignees = Some(vec![Assignee { name: "Ada".into() }, Assignee { name: "Lin".into() }]);
        task.duration = Some(3.5);
        task.start_date = Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        task.due_date = Some(now() - Duration::days(2));

        let card = render(&task, 0, &ctx);
        assert_eq!(card.priority.as_ref().map(|p| p.glyph.as_str()), Some("🟠"));
        assert_eq!(card.description.as_ref().map(|d| d.max_lines), Some(2));
        assert_eq!(card.dependency_summary.as_deref(), Some("A (Done), B"));
        assert_eq!(card.dependency_count, Some(2));
        assert_eq!(card.assignees, vec!["Ada".to_string(), "Lin".to_string()]);
        assert_eq!(card.duration.as_deref(), Some("3.5h"));
        assert!(card.start_date.is_some());

        let status = card.status.expect("status badge");
        assert_eq!(status.name, "Blocked");
        assert_eq!(status.colors.background, "#dc262620");
        assert_eq!(status.colors.border, "#dc262640");

        let due = card.due_date.expect("due date");
        assert!(due.overdue);
        assert_eq!(due.color, theme.due_overdue);
    }

    #[test]
    fn test_unknown_priority_renders_default_glyph() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, now());
        let mut task = Task::new("1", "x");
        task.priority = Some(Priority::parse("asap"));
        let card = render(&task, 0, &ctx);
        assert_eq!(card.priority.as_ref(), Some(&theme.priority_default));
    }

    #[test]
    fn test_future_due_date_not_overdue() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, now());
        let mut task = Task::new("1", "x");
        task.due_date = Some(now() + Duration::hours(1));
        let due = render(&task, 0, &ctx).due_date.unwrap();
        assert!(!due.overdue);
        assert_eq!(due.color, theme.due_normal);
    }

    #[test]
    fn test_unformattable_date_pattern_still_renders() {
        let theme = Theme::default();
        let mut ctx = RenderContext::new(&theme, now());
        ctx.date_format = "%Q";
        let mut task = Task::new("1", "x");
        task.start_date = Some(now());
        task.due_date = Some(now() + Duration::days(1));

        let card = render(&task, 0, &ctx);
        let expected = format_short_date(now() + Duration::days(1), DEFAULT_DATE_FORMAT);
        assert_eq!(card.due_date.map(|d| d.text), Some(expected));
        assert_eq!(card.start_date, Some(format_short_date(now(), DEFAULT_DATE_FORMAT)));
    }

    #[test]
    fn test_recursion_preserves_order_and_depth() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, now());
        let mut grandchild = Task::new("1.1.1", "leaf");
        grandchild.subtasks = Some(Vec::new());
        let mut child_a = Task::new("1.1", "a");
        child_a.subtasks = Some(vec![grandchild]);
        let child_b = Task::new("1.2", "b");
        let mut root = Task::new("1", "root");
        root.subtasks = Some(vec![child_a, child_b]);

        let card = render(&root, 0, &ctx);
        let walked: Vec<(&str, usize, u32, &str)> = card
            .walk()
            .into_iter()
            .map(|c| (c.id.as_str(), c.depth, c.indent, c.marker.as_str()))
            .collect();
        assert_eq!(
            walked,
            vec![
                ("1", 0, 0, "T"),
                ("1.1", 1, 24, "S"),
                ("1.1.1", 2, 48, "S"),
                ("1.2", 1, 24, "S"),
            ]
        );
    }

    #[test]
    fn test_depth_guard_stops_descending() {
        let theme = Theme::default();
        let mut ctx = RenderContext::new(&theme, now());
        ctx.max_depth = 1;
        let mut child = Task::new("c", "child");
        child.subtasks = Some(vec![Task::new("g1", "g1"), Task::new("g2", "g2")]);
        let mut root = Task::new("r", "root");
        root.subtasks = Some(vec![child]);

        let card = render(&root, 0, &ctx);
        assert_eq!(card.children.len(), 1);
        assert!(card.children[0].children.is_empty());
        assert_eq!(card.children[0].truncated_children, 2);
    }
}
