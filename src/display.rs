//! Derived display attributes.
//!
//! Everything here is a pure function of issue data, the theme and the render
//! clock. Nothing is stored back on the issue.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};

use crate::fields::Priority;
use crate::renderer::DEFAULT_DATE_FORMAT;
use crate::task::{Dependency, TaskStatus};
use crate::theme::{GlyphStyle, Theme, BACKGROUND_ALPHA, BORDER_ALPHA, INDENT_UNIT};

/// Badge colours derived from a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColors {
    pub background: String,
    pub foreground: String,
    pub border: String,
}

/// Colour triple for a status badge.
///
/// A status colour is reused at two alpha levels by plain string
/// concatenation, so `#3b82f6` becomes `#3b82f620` / `#3b82f640`.
pub fn status_colors(status: Option<&TaskStatus>, theme: &Theme) -> StatusColors {
    match status.and_then(|s| s.color.as_deref()) {
        Some(color) => StatusColors {
            background: format!("{color}{BACKGROUND_ALPHA}"),
            foreground: color.to_string(),
            border: format!("{color}{BORDER_ALPHA}"),
        },
        None => StatusColors {
            background: theme.neutral_background.clone(),
            foreground: theme.neutral_foreground.clone(),
            border: theme.neutral_border.clone(),
        },
    }
}

/// Glyph and colour for a priority. Total over every input.
pub fn priority_style<'t>(priority: Option<&Priority>, theme: &'t Theme) -> &'t GlyphStyle {
    match priority {
        Some(Priority::Urgent) => &theme.priority_urgent,
        Some(Priority::High) => &theme.priority_high,
        Some(Priority::Medium) => &theme.priority_medium,
        Some(Priority::Low) => &theme.priority_low,
        Some(Priority::Other(_)) | None => &theme.priority_default,
    }
}

/// Horizontal offset in display units for a nesting depth.
pub fn indent(depth: usize) -> u32 {
    depth as u32 * INDENT_UNIT
}

/// "T" for top-level issues, "S" for anything nested.
pub fn type_marker(depth: usize, theme: &Theme) -> &str {
    if depth == 0 {
        &theme.top_level_marker
    } else {
        &theme.subtask_marker
    }
}

/// A due date is overdue only when strictly before `now`.
pub fn is_overdue(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    due < now
}

/// Comma-joined `title (status)` list, or `None` when there is nothing to show.
pub fn dependency_summary(deps: &[Dependency]) -> Option<String> {
    if deps.is_empty() {
        return None;
    }
    let parts: Vec<String> = deps
        .iter()
        .map(|d| match &d.status {
            Some(status) => format!("{} ({})", d.title, status.name),
            None => d.title.clone(),
        })
        .collect();
    Some(parts.join(", "))
}

/// True when chrono understands every specifier in `date_format`.
pub fn is_valid_date_format(date_format: &str) -> bool {
    !StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error))
}

/// Format a timestamp as a short date in the local time zone.
///
/// A pattern chrono cannot format falls back to `DEFAULT_DATE_FORMAT`.
pub fn format_short_date(ts: DateTime<Utc>, date_format: &str) -> String {
    let local = ts.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(date_format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", local.format(DEFAULT_DATE_FORMAT));
    }
    out
}

/// Format an hour estimate, e.g. `8h` or `1.5h`.
pub fn format_duration(hours: f64) -> String {
    format!("{hours}h")
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Word-wrap `text` to `width` columns, keeping at most `max_lines` lines.
///
/// When text is cut the last kept line ends in `…`. Words longer than the
/// width are hard-truncated.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut overflow = false;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if current.is_empty() {
            current = truncate(word, width);
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                overflow = true;
                break;
            }
            current = truncate(word, width);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if overflow {
        if let Some(last) = lines.last_mut() {
            let kept = truncate(last, width.saturating_sub(1).max(1));
            *last = format!("{}…", kept.trim_end_matches('…'));
        }
    }
    lines
}
