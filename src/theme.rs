//! Style constants shared by every render pass.
//!
//! The theme is initialised once per process (optionally from the config file)
//! and only read afterwards. Colours are `#rrggbb` strings so the derived
//! attributes can be compared as exact strings by any host.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

static THEME: OnceLock<Theme> = OnceLock::new();

/// Display units a single nesting level is shifted right by.
pub const INDENT_UNIT: u32 = 24;

/// Alpha suffix appended to a status colour for its badge background (~12.5%).
pub const BACKGROUND_ALPHA: &str = "20";
/// Alpha suffix appended to a status colour for its badge border (~25%).
pub const BORDER_ALPHA: &str = "40";

/// A glyph and colour pair used for priority markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphStyle {
    pub glyph: String,
    pub color: String,
}

impl GlyphStyle {
    fn new(glyph: &str, color: &str) -> Self {
        GlyphStyle {
            glyph: glyph.to_string(),
            color: color.to_string(),
        }
    }
}

/// Process-wide read-only style table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Neutral badge background used when a status has no colour.
    pub neutral_background: String,
    /// Neutral badge text colour.
    pub neutral_foreground: String,
    pub neutral_border: String,
    pub priority_urgent: GlyphStyle,
    pub priority_high: GlyphStyle,
    pub priority_medium: GlyphStyle,
    pub priority_low: GlyphStyle,
    /// Used for absent or unrecognised priorities.
    pub priority_default: GlyphStyle,
    pub due_overdue: String,
    pub due_normal: String,
    pub top_level_marker: String,
    pub subtask_marker: String,
    pub empty_icon: String,
    pub empty_message: String,
    /// Colour the terminal widgets blend translucent colours onto.
    pub canvas: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            neutral_background: "#f3f4f6".into(),
            neutral_foreground: "#64748b".into(),
            neutral_border: "#e5e7eb".into(),
            priority_urgent: GlyphStyle::new("🔴", "#ef4444"),
            priority_high: GlyphStyle::new("🟠", "#f97316"),
            priority_medium: GlyphStyle::new("🟡", "#f59e0b"),
            priority_low: GlyphStyle::new("🟢", "#22c55e"),
            priority_default: GlyphStyle::new("⚪", "#9ca3af"),
            due_overdue: "#ef4444".into(),
            due_normal: "#64748b".into(),
            top_level_marker: "T".into(),
            subtask_marker: "S".into(),
            empty_icon: "📋".into(),
            empty_message: "No issues yet".into(),
            canvas: "#111827".into(),
        }
    }
}

impl Theme {
    /// The process-wide theme, falling back to defaults if `install` never ran.
    pub fn global() -> &'static Theme {
        THEME.get_or_init(Theme::default)
    }

    /// Install the process-wide theme. Only the first call wins; returns
    /// `false` if a theme was already in place.
    pub fn install(theme: Theme) -> bool {
        THEME.set(theme).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_theme_overrides_keep_defaults() {
        let theme: Theme = serde_json::from_str(r##"{"due_overdue": "#ff0000"}"##).unwrap();
        assert_eq!(theme.due_overdue, "#ff0000");
        assert_eq!(theme.neutral_background, Theme::default().neutral_background);
    }

    #[test]
    fn test_global_is_stable() {
        let a = Theme::global() as *const Theme;
        let b = Theme::global() as *const Theme;
        assert_eq!(a, b);
    }
}
