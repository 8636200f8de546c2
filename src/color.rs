//! Color blending used to synthesize palette fields a theme leaves unset.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref RE_HEX: Regex = Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

/// How derived palette colors are computed from `bg` and `fg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Hard switch at 0.5: the historical behaviour, see [`blend`].
    #[default]
    Threshold,
    /// Per-channel sRGB interpolation, see [`mix_linear`].
    Linear,
}

impl BlendMode {
    pub fn blend(self, a: &str, b: &str, ratio: f64) -> String {
        match self {
            BlendMode::Threshold => blend(a, b, ratio),
            BlendMode::Linear => mix_linear(a, b, ratio).unwrap_or_else(|| blend(a, b, ratio)),
        }
    }
}

/// Blend `a` towards `b` by `ratio`.
///
/// This is a coarse placeholder rather than an interpolation: a ratio up to and
/// including 0.5 yields `a`, anything above yields `b`. The fractional ratios the
/// palette uses (0.03, 0.2, 0.3, 0.5, 0.6) therefore collapse onto one of the two
/// inputs. Use [`BlendMode::Linear`] for real mixing.
pub fn blend(a: &str, b: &str, ratio: f64) -> String {
    if ratio > 0.5 {
        b.to_string()
    } else {
        a.to_string()
    }
}

/// Interpolate two hex colors channel by channel.
///
/// Returns `None` when either input is not `#rgb` / `#rrggbb`. The ratio is
/// clamped to `[0, 1]`; the result is always lowercase `#rrggbb`.
pub fn mix_linear(a: &str, b: &str, ratio: f64) -> Option<String> {
    let from = parse_hex(a)?;
    let to = parse_hex(b)?;
    let t = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };

    let channel = |x: u8, y: u8| -> u8 {
        let v = f64::from(x) + (f64::from(y) - f64::from(x)) * t;
        v.round().clamp(0.0, 255.0) as u8
    };

    Some(format!(
        "#{:02x}{:02x}{:02x}",
        channel(from[0], to[0]),
        channel(from[1], to[1]),
        channel(from[2], to[2])
    ))
}

/// True when the value is an explicit hex color (`#...`).
pub fn is_hex_color(value: &str) -> bool {
    value.starts_with('#')
}

fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let caps = RE_HEX.captures(color.trim())?;
    let digits = caps.get(1)?.as_str();

    let mut rgb = [0u8; 3];
    if digits.len() == 3 {
        for (slot, c) in rgb.iter_mut().zip(digits.chars()) {
            let doubled: String = [c, c].iter().collect();
            *slot = u8::from_str_radix(&doubled, 16).ok()?;
        }
    } else {
        for (i, slot) in rgb.iter_mut().enumerate() {
            *slot = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
        }
    }
    Some(rgb)
}
