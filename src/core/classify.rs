//! Maps 0-100 sentiment scalars to labelled buckets and display colors.
//!
//! Bucket selection uses a strict less-than rule for every index: a value
//! sitting exactly on a boundary belongs to the bucket above it. Altseason
//! additionally gets a continuous hue so its color tracks the value smoothly.

use crate::core::error::MetricsError;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Color {
    Hex(&'static str),
    /// Hue in degrees, saturation and lightness in percent.
    Hsl {
        hue: f64,
        saturation: f64,
        lightness: f64,
    },
}

impl Color {
    /// Converts to 8-bit RGB, falling back to grey for malformed hex codes.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Hex(code) => parse_hex(code).unwrap_or((128, 128, 128)),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(*hue, *saturation, *lightness),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Hex(code) => write!(f, "{code}"),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
        }
    }
}

fn parse_hex(code: &str) -> Option<(u8, u8, u8)> {
    let hex = code.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let (saturation, lightness) = (saturation / 100.0, lightness / 100.0);
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub upper_bound: f64,
    pub label: &'static str,
    pub color: Color,
}

impl Bucket {
    pub const fn new(upper_bound: f64, label: &'static str, color: &'static str) -> Self {
        Self {
            upper_bound,
            label,
            color: Color::Hex(color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub label: &'static str,
    pub color: Color,
}

pub const FEAR_GREED_BUCKETS: [Bucket; 4] = [
    Bucket::new(25.0, "Extreme Fear", "#8e2e2e"),
    Bucket::new(50.0, "Fear", "#c0392b"),
    Bucket::new(75.0, "Greed", "#e67e22"),
    Bucket::new(100.0, "Extreme Greed", "#27ae60"),
];

pub const ALTSEASON_BUCKETS: [Bucket; 3] = [
    Bucket::new(25.0, "Bitcoin Season", "#f39c12"),
    Bucket::new(75.0, "Neutral", "#7f8c8d"),
    Bucket::new(100.0, "Altcoin Season", "#27ae60"),
];

fn check_range(value: f64) -> Result<(), MetricsError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(MetricsError::OutOfRange(value))
    }
}

/// Picks the first bucket whose upper bound is strictly greater than `value`.
///
/// Values at or past the final bound fall into the final bucket.
pub fn classify(value: f64, buckets: &[Bucket]) -> Result<Classification, MetricsError> {
    check_range(value)?;
    let last = buckets.last().ok_or(MetricsError::NoBuckets)?;
    let bucket = buckets
        .iter()
        .find(|b| value < b.upper_bound)
        .unwrap_or(last);
    Ok(Classification {
        label: bucket.label,
        color: bucket.color,
    })
}

/// Red-to-green gradient where the hue in degrees equals the index value.
pub fn altseason_color(value: f64) -> Result<Color, MetricsError> {
    check_range(value)?;
    Ok(Color::Hsl {
        hue: value,
        saturation: 60.0,
        lightness: 35.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_value_moves_to_next_bucket() {
        let buckets = [
            Bucket::new(25.0, "fear", "#000000"),
            Bucket::new(50.0, "x", "#111111"),
            Bucket::new(100.0, "y", "#222222"),
        ];
        assert_eq!(classify(25.0, &buckets).unwrap().label, "x");
        assert_eq!(classify(24.999, &buckets).unwrap().label, "fear");
    }

    #[test]
    fn test_fear_greed_buckets() {
        let label = |v: f64| classify(v, &FEAR_GREED_BUCKETS).unwrap().label;
        assert_eq!(label(0.0), "Extreme Fear");
        assert_eq!(label(24.0), "Extreme Fear");
        assert_eq!(label(25.0), "Fear");
        assert_eq!(label(49.0), "Fear");
        assert_eq!(label(50.0), "Greed");
        assert_eq!(label(74.0), "Greed");
        assert_eq!(label(75.0), "Extreme Greed");
        assert_eq!(label(100.0), "Extreme Greed");

        let color = classify(10.0, &FEAR_GREED_BUCKETS).unwrap().color;
        assert_eq!(color, Color::Hex("#8e2e2e"));
        assert_eq!(color.to_rgb(), (0x8e, 0x2e, 0x2e));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            classify(-0.1, &FEAR_GREED_BUCKETS),
            Err(MetricsError::OutOfRange(-0.1))
        );
        assert_eq!(
            classify(100.5, &FEAR_GREED_BUCKETS),
            Err(MetricsError::OutOfRange(100.5))
        );
        assert!(matches!(
            classify(f64::NAN, &FEAR_GREED_BUCKETS),
            Err(MetricsError::OutOfRange(_))
        ));
        assert_eq!(
            altseason_color(101.0),
            Err(MetricsError::OutOfRange(101.0))
        );
    }

    #[test]
    fn test_no_buckets() {
        assert_eq!(classify(10.0, &[]), Err(MetricsError::NoBuckets));
    }

    #[test]
    fn test_altseason_color_is_monotonic_in_hue() {
        let mut previous = -1.0;
        for value in (0..=100).map(f64::from) {
            match altseason_color(value).unwrap() {
                Color::Hsl { hue, .. } => {
                    assert!(hue > previous);
                    previous = hue;
                }
                other => panic!("Expected HSL color, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_color_conversions() {
        assert_eq!(altseason_color(0.0).unwrap().to_rgb(), (143, 36, 36));
        assert_eq!(altseason_color(0.0).unwrap().to_string(), "hsl(0, 60%, 35%)");
        assert_eq!(Color::Hex("#27ae60").to_rgb(), (0x27, 0xae, 0x60));
        assert_eq!(Color::Hex("oops").to_rgb(), (128, 128, 128));
    }
}
