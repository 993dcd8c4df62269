//! Hex color utilities and the default sculpture palette.
//!
//! Colors are opaque `#rrggbb` string tokens throughout the engine; this
//! module is the only place that looks inside them.

/// The default block palette.
pub const PALETTE: [&str; 10] = [
    "#ef4444", // red
    "#f97316", // orange
    "#eab308", // yellow
    "#22c55e", // green
    "#3b82f6", // blue
    "#a855f7", // purple
    "#ec4899", // pink
    "#ffffff", // white
    "#94a3b8", // slate
    "#1e293b", // dark
];

/// Parse a `#rrggbb` token into channel bytes.
#[must_use]
pub fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Format channel bytes back into a `#rrggbb` token.
#[must_use]
pub fn format_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Scale every channel by `(100 + percent) / 100`, clamped to 255.
///
/// Negative percentages darken, positive lighten. Channel math truncates
/// toward zero. Tokens that do not parse as `#rrggbb` are returned
/// unchanged so a bad palette entry degrades to flat shading instead of
/// failing the frame.
#[must_use]
pub fn shade(color: &str, percent: i32) -> String {
    let Some(rgb) = parse_hex(color) else {
        return color.to_string();
    };
    let scaled = rgb.map(|c| {
        let v = i64::from(c) * i64::from(100 + percent) / 100;
        u8::try_from(v.clamp(0, 255)).unwrap_or(u8::MAX)
    });
    format_hex(scaled)
}

/// Lighten a color by the given percentage.
#[must_use]
pub fn lighten(color: &str, percent: i32) -> String {
    shade(color, percent.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        assert_eq!(parse_hex("#3b82f6"), Some([0x3b, 0x82, 0xf6]));
        assert_eq!(format_hex([0x3b, 0x82, 0xf6]), "#3b82f6");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_hex("3b82f6"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_shade_darkens() {
        // 255 * 80 / 100 = 204 = 0xcc
        assert_eq!(shade("#ffffff", -20), "#cccccc");
        // 255 * 60 / 100 = 153 = 0x99
        assert_eq!(shade("#ffffff", -40), "#999999");
    }

    #[test]
    fn test_lighten_clamps_at_white() {
        assert_eq!(lighten("#ffffff", 20), "#ffffff");
        assert_eq!(lighten("#808080", 50), format_hex([192, 192, 192]));
    }

    #[test]
    fn test_invalid_token_passes_through() {
        assert_eq!(shade("tomato", -20), "tomato");
    }

    #[test]
    fn test_palette_entries_parse() {
        for color in PALETTE {
            assert!(parse_hex(color).is_some(), "bad palette entry {color}");
        }
    }
}
