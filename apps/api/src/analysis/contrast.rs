//! WCAG 2.x relative luminance and contrast ratio.

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
}

/// Parses `#rgb` or `#rrggbb` (the `#` is optional, case-insensitive).
pub fn parse_hex(input: &str) -> Option<Rgb> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };

    let channel = |range: std::ops::Range<usize>| {
        expanded
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };
    Some(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Like `parse_hex`, but anything unparseable reads as black.
pub fn parse_hex_or_black(input: &str) -> Rgb {
    parse_hex(input).unwrap_or(Rgb::BLACK)
}

fn linearize(channel: u8) -> f64 {
    let p = f64::from(channel) / 255.0;
    if p <= 0.03928 {
        p / 12.92
    } else {
        ((p + 0.055) / 1.055).powf(2.4)
    }
}

pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Contrast ratio between two hex colors, rounded to 2 decimals. Range 1.0..=21.0.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    let la = relative_luminance(parse_hex_or_black(a));
    let lb = relative_luminance(parse_hex_or_black(b));
    let ratio = (la.max(lb) + 0.05) / (la.min(lb) + 0.05);
    (ratio * 100.0).round() / 100.0
}

/// Contrast for an optional pair; no data reads as 1.0.
pub fn pair_contrast(pair: Option<(&str, &str)>) -> f64 {
    pair.map_or(1.0, |(a, b)| contrast_ratio(a, b))
}
