//! Deterministic colors for group bands and dependency arrows.
//!
//! Both are pure functions of their input so a chart looks the same on every
//! render. Group colors are pastel RGB; arrow colors are HSL hues keyed by
//! the ordered (dependency, dependent) pair.

use std::fmt;

use egui::Color32;
use serde::Serialize;

use crate::model::TaskKey;

const PASTEL_BASE: u8 = 180;
const PASTEL_RANGE: u32 = 76;

const ARROW_SATURATION: f64 = 0.70;
const ARROW_LIGHTNESS: f64 = 0.50;

/// Rolling string hash over UTF-16 code units.
///
/// Only the `<< 5` step is truncated to 32 bits; the running sum is kept
/// wide, so long names produce values outside the `i32` range.
pub fn text_hash(text: &str) -> i64 {
    text.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        i64::from(unit).wrapping_add(shifted).wrapping_sub(hash)
    })
}

/// Pastel color for a group name. Every channel lies in `180..=255`.
pub fn pastel_color_from_text(text: &str) -> Color32 {
    let hash = text_hash(text);
    let narrow = hash as i32;
    // Each slice is below 76, so the sums stay within u8.
    let red = (hash.unsigned_abs() % u64::from(PASTEL_RANGE)) as u8;
    let green = ((narrow >> 8).unsigned_abs() % PASTEL_RANGE) as u8;
    let blue = ((narrow >> 16).unsigned_abs() % PASTEL_RANGE) as u8;
    Color32::from_rgb(PASTEL_BASE + red, PASTEL_BASE + green, PASTEL_BASE + blue)
}

/// Lowercase `#rrggbb` form of an opaque color.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Color of the arrow drawn from `source` (the dependency) to `target`.
///
/// Direction matters: swapping the keys gives a different hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct ArrowColor {
    /// Degrees, `0..360`.
    pub hue: u16,
}

impl ArrowColor {
    pub fn for_pair(source: TaskKey, target: TaskKey) -> Self {
        let hash = source.wrapping_mul(1000).wrapping_add(target);
        // rem_euclid keeps negative keys in range.
        let hue = hash.rem_euclid(360) as u16;
        Self { hue }
    }

    /// Convert to RGB for renderers that cannot take HSL directly.
    pub fn to_color32(self) -> Color32 {
        let (r, g, b) = hsl_to_rgb(f64::from(self.hue), ARROW_SATURATION, ARROW_LIGHTNESS);
        Color32::from_rgb(r, g, b)
    }

    /// The same hue with the arrow's opacity applied.
    pub fn with_opacity(self, opacity: f32) -> Color32 {
        self.to_color32().gamma_multiply(opacity)
    }
}

impl fmt::Display for ArrowColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, 70%, 50%)", self.hue)
    }
}

impl From<ArrowColor> for String {
    fn from(color: ArrowColor) -> Self {
        color.to_string()
    }
}

/// Shorthand for [`ArrowColor::for_pair`].
pub fn arrow_color(source: TaskKey, target: TaskKey) -> ArrowColor {
    ArrowColor::for_pair(source, target)
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

/// Serde helper writing a `Color32` as `#rrggbb`.
pub mod hex_color {
    use egui::Color32;
    use serde::Serializer;

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_hex(*color))
    }
}
