//! Drawing of the whole issue list: header with selectors, cards, or the
//! empty-state placeholder.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::theme::Theme;
use crate::tui::card::card_lines;
use crate::tui::colors::{ACCENT, MUTED};
use crate::view::{EmptyState, Selector, TaskListView};

fn selector_spans(selector: &Selector) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{}: ", selector.label), Style::default().fg(MUTED)),
        Span::styled(
            format!("{} ▾", selector.selected_label()),
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
    ]
}

fn draw_empty(f: &mut Frame, area: Rect, empty: &EmptyState) {
    let top_pad = area.height.saturating_sub(4) / 2;
    let mut text: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    text.push(Line::from(empty.icon.clone()));
    text.push(Line::from(Span::styled(empty.message.clone(), Style::default().fg(MUTED))));

    let placeholder = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(placeholder, area);
}

/// Draw `view` into `area`. The list state selection indexes cards in pre-order.
pub fn draw_task_list(
    f: &mut Frame,
    area: Rect,
    view: &TaskListView,
    list_state: &mut ListState,
    cells_per_indent_unit: u16,
    theme: &Theme,
) {
    let (header, grouping, sorting, cards) = match view {
        TaskListView::Empty(empty) => return draw_empty(f, area, empty),
        TaskListView::List { header, grouping, sorting, cards, .. } => (header, grouping, sorting, cards),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let mut header_spans = vec![
        Span::styled(header.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("    "),
    ];
    header_spans.extend(selector_spans(grouping));
    header_spans.push(Span::raw("    "));
    header_spans.extend(selector_spans(sorting));
    let header_block = Paragraph::new(Line::from(header_spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)));
    f.render_widget(header_block, chunks[0]);

    let width = chunks[1].width.saturating_sub(2);
    let selected = list_state.selected();
    let items: Vec<ListItem> = cards
        .iter()
        .flat_map(|c| c.walk())
        .enumerate()
        .map(|(i, card)| {
            ListItem::new(card_lines(card, width, cells_per_indent_unit, theme, selected == Some(i)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::Rgb(30, 41, 59)));
    f.render_stateful_widget(list, chunks[1], list_state);
}
