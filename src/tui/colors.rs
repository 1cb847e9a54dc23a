//! Colour conversion for the terminal user interface.
//!
//! Theme and status colours are hex strings. Terminals have no alpha, so
//! `#rrggbbaa` values are blended onto the theme canvas colour.

use ratatui::style::Color;

/// Used for the header bar and the selection highlight.
pub const ACCENT: Color = Color::Rgb(99, 102, 241);
/// Used for secondary text such as descriptions and metadata labels.
pub const MUTED: Color = Color::Rgb(148, 163, 184);

fn parse_hex(hex: &str) -> Option<(u8, u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    match digits.len() {
        6 => Some((byte(0)?, byte(2)?, byte(4)?, 0xff)),
        8 => Some((byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// Convert a `#rrggbb` or `#rrggbbaa` string to a terminal colour, blending
/// any alpha onto `canvas`. Unparseable input yields `None`.
pub fn hex_to_color(hex: &str, canvas: &str) -> Option<Color> {
    let (r, g, b, a) = parse_hex(hex)?;
    if a == 0xff {
        return Some(Color::Rgb(r, g, b));
    }
    let (cr, cg, cb, _) = parse_hex(canvas).unwrap_or((0, 0, 0, 0xff));
    let mix = |fg: u8, bg: u8| -> u8 {
        let a = a as u16;
        ((fg as u16 * a + bg as u16 * (255 - a)) / 255) as u8
    };
    Some(Color::Rgb(mix(r, cr), mix(g, cg), mix(b, cb)))
}
