//! Drawing of a single issue card as terminal lines.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::display::clamp_lines;
use crate::theme::{Theme, INDENT_UNIT};
use crate::tui::colors::{hex_to_color, ACCENT, MUTED};
use crate::view::TaskCardView;

/// Terminal columns a card is shifted right by.
pub fn indent_columns(card: &TaskCardView, cells_per_indent_unit: u16) -> u16 {
    (card.indent / INDENT_UNIT) as u16 * cells_per_indent_unit
}

fn color(hex: &str, theme: &Theme) -> Color {
    hex_to_color(hex, &theme.canvas).unwrap_or(Color::Reset)
}

/// Lines for one card, without its children. `width` is the drawable width.
pub fn card_lines(
    card: &TaskCardView,
    width: u16,
    cells_per_indent_unit: u16,
    theme: &Theme,
    selected: bool,
) -> Vec<Line<'static>> {
    let pad = " ".repeat(indent_columns(card, cells_per_indent_unit) as usize);
    let inner_width = width.saturating_sub(pad.len() as u16 + 4) as usize;
    let mut lines = Vec::new();

    // Identity line: marker, title, priority, actions.
    let marker_style = if card.depth == 0 {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        Style::default().fg(Color::Black).bg(MUTED)
    };
    let mut identity = vec![
        Span::raw(pad.clone()),
        Span::styled(format!(" {} ", card.marker), marker_style),
        Span::raw(" "),
        Span::styled(card.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if let Some(priority) = &card.priority {
        identity.push(Span::raw(" "));
        identity.push(Span::styled(priority.glyph.clone(), Style::default().fg(color(&priority.color, theme))));
    }
    let action_style = if selected {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    for action in card.actions {
        identity.push(Span::raw(" "));
        identity.push(Span::styled(format!("[{}]", action.label()), action_style));
    }
    lines.push(Line::from(identity));

    if let Some(description) = &card.description {
        for text in clamp_lines(&description.text, inner_width, description.max_lines) {
            lines.push(Line::from(vec![
                Span::raw(format!("{pad}    ")),
                Span::styled(text, Style::default().fg(MUTED)),
            ]));
        }
    }

    if let Some(summary) = &card.dependency_summary {
        lines.push(Line::from(vec![
            Span::raw(format!("{pad}    ")),
            Span::styled("Depends on: ", Style::default().fg(MUTED)),
            Span::raw(summary.clone()),
        ]));
    }

    let mut meta: Vec<Span<'static>> = Vec::new();
    if let Some(status) = &card.status {
        meta.push(Span::styled(
            format!(" {} ", status.name),
            Style::default()
                .fg(color(&status.colors.foreground, theme))
                .bg(color(&status.colors.background, theme)),
        ));
    }
    if let Some(count) = card.dependency_count {
        meta.push(Span::styled(format!(" ⛓ {count}"), Style::default().fg(MUTED)));
    }
    if !card.assignees.is_empty() {
        meta.push(Span::styled(format!(" 👤 {}", card.assignees.join(", ")), Style::default().fg(MUTED)));
    }
    if let Some(duration) = &card.duration {
        meta.push(Span::styled(format!(" ⏱ {duration}"), Style::default().fg(MUTED)));
    }
    if let Some(start) = &card.start_date {
        meta.push(Span::styled(format!(" ▶ {start}"), Style::default().fg(MUTED)));
    }
    if let Some(due) = &card.due_date {
        let mut style = Style::default().fg(color(&due.color, theme));
        if due.overdue {
            style = style.add_modifier(Modifier::BOLD);
        }
        meta.push(Span::styled(format!(" ⚑ {}", due.text), style));
    }
    if card.truncated_children > 0 {
        meta.push(Span::styled(
            format!(" (+{} nested)", card.truncated_children),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if !meta.is_empty() {
        let mut line = vec![Span::raw(format!("{pad}   "))];
        line.extend(meta);
        lines.push(Line::from(line));
    }

    lines
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::renderer::{render, RenderContext};
    use crate::task::{Task, TaskStatus};

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_indent_columns() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, Utc::now());
        let card = render(&Task::new("1", "x"), 3, &ctx);
        assert_eq!(indent_columns(&card, 2), 6);
        assert_eq!(indent_columns(&card, 0), 0);
    }

    #[test]
    fn test_card_lines_content() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());
        let mut task = Task::new("1", "Fix login");
        task.description = Some("a long description that will need more than two lines to show at this width".into());
        task.status = Some(TaskStatus::new("Open", Some("#22c55e")));
        let card = render(&task, 1, &ctx);

        let lines = card_lines(&card, 30, 2, &theme, false);
        let first = text(&lines[0]);
        assert!(first.starts_with("   S  Fix login"));
        assert!(first.contains("[Delete]"));
        // identity + two description lines + metadata
        assert_eq!(lines.len(), 4);
        assert!(text(&lines[2]).ends_with('…'));
        assert!(text(&lines[3]).contains("Open"));
    }

    #[test]
    fn test_bare_card_is_one_line() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, Utc::now());
        let card = render(&Task::new("1", "Plain"), 0, &ctx);
        assert_eq!(card_lines(&card, 80, 2, &theme, true).len(), 1);
    }
}
