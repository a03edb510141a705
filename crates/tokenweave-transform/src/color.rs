//! Color space conversion.
//!
//! Colors are stored as `#rrggbb` or `#rrggbbaa` hex strings. This module
//! converts that canonical form to the CSS notations the exporters emit and
//! parses those notations back, so any supported string can be re-targeted.
//!
//! OKLCH goes through the usual pipeline: sRGB is linearized (0.04045
//! breakpoint), projected into LMS cone response, cube-rooted into OKLab and
//! finally expressed in polar form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::units::format_number;

/// Output notation for color tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
    Oklch,
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorFormat::Hex => "hex",
            ColorFormat::Rgb => "rgb",
            ColorFormat::Hsl => "hsl",
            ColorFormat::Oklch => "oklch",
        };
        f.write_str(name)
    }
}

impl FromStr for ColorFormat {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(ColorFormat::Hex),
            "rgb" | "rgba" => Ok(ColorFormat::Rgb),
            "hsl" | "hsla" => Ok(ColorFormat::Hsl),
            "oklch" => Ok(ColorFormat::Oklch),
            other => Err(TransformError::UnknownColorFormat(other.to_string())),
        }
    }
}

/// An 8-bit sRGB color with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build from unit-interval channels, the host's native color model.
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: unit_to_byte(r),
            g: unit_to_byte(g),
            b: unit_to_byte(b),
            a: a.clamp(0.0, 1.0),
        }
    }

    fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Hex notation; eight digits when translucent.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r,
                self.g,
                self.b,
                unit_to_byte(self.a)
            )
        }
    }

    pub fn to_rgb_string(&self) -> String {
        if self.is_opaque() {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha(self.a))
        }
    }

    pub fn to_hsl_string(&self) -> String {
        let (h, s, l) = rgb_to_hsl(self.r, self.g, self.b);
        let (h, s, l) = (
            format_number(h, 2),
            format_number(s * 100.0, 2),
            format_number(l * 100.0, 2),
        );
        if self.is_opaque() {
            format!("hsl({}, {}%, {}%)", h, s, l)
        } else {
            format!("hsla({}, {}%, {}%, {})", h, s, l, alpha(self.a))
        }
    }

    pub fn to_oklch_string(&self) -> String {
        let (l, c, h) = rgb_to_oklch(self.r, self.g, self.b);
        let body = format!(
            "{}% {} {}",
            format_number(l * 100.0, 2),
            format_number(c, 4),
            format_number(h, 2)
        );
        if self.is_opaque() {
            format!("oklch({})", body)
        } else {
            format!("oklch({} / {})", body, alpha(self.a))
        }
    }

    pub fn format(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.to_hex(),
            ColorFormat::Rgb => self.to_rgb_string(),
            ColorFormat::Hsl => self.to_hsl_string(),
            ColorFormat::Oklch => self.to_oklch_string(),
        }
    }
}

fn unit_to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn alpha(a: f64) -> String {
    format_number(a, 3)
}

/// Canonical hex for a unit-interval RGBA color.
pub fn rgba_to_hex(r: f64, g: f64, b: f64, a: f64) -> String {
    Rgb::from_unit(r, g, b, a).to_hex()
}

/// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex(input: &str) -> Option<Rgb> {
    let hex = input.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };
    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    let a = if expanded.len() == 8 {
        f64::from(byte(6)?) / 255.0
    } else {
        1.0
    };
    Some(Rgb::with_alpha(byte(0)?, byte(2)?, byte(4)?, a))
}

/// Parse any notation this module emits: hex, `rgb[a]()`, `hsl[a]()` or
/// `oklch()`.
pub fn parse_color(input: &str) -> Option<Rgb> {
    let input = input.trim();
    if input.starts_with('#') {
        return parse_hex(input);
    }
    let open = input.find('(')?;
    let body = input.strip_suffix(')')?.get(open + 1..)?;
    let name = input[..open].trim().to_ascii_lowercase();
    let args: Vec<&str> = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    let alpha = match args.get(3) {
        Some(a) => parse_component(a, 1.0)?,
        None => 1.0,
    };
    if args.len() < 3 {
        return None;
    }
    match name.as_str() {
        "rgb" | "rgba" => Some(Rgb::with_alpha(
            parse_component(args[0], 255.0)?.round().clamp(0.0, 255.0) as u8,
            parse_component(args[1], 255.0)?.round().clamp(0.0, 255.0) as u8,
            parse_component(args[2], 255.0)?.round().clamp(0.0, 255.0) as u8,
            alpha,
        )),
        "hsl" | "hsla" => {
            let h = args[0].trim_end_matches("deg").parse::<f64>().ok()?;
            let s = parse_component(args[1], 1.0)?;
            let l = parse_component(args[2], 1.0)?;
            let (r, g, b) = hsl_to_rgb(h, s, l);
            Some(Rgb::with_alpha(r, g, b, alpha))
        }
        "oklch" => {
            let l = parse_component(args[0], 1.0)?;
            let c = args[1].parse::<f64>().ok()?;
            let h = args[2].trim_end_matches("deg").parse::<f64>().ok()?;
            let (r, g, b) = oklch_to_rgb(l, c, h);
            Some(Rgb::with_alpha(r, g, b, alpha))
        }
        _ => None,
    }
}

/// Percentages map to `0..=scale`; bare numbers are taken as-is.
fn parse_component(raw: &str, scale: f64) -> Option<f64> {
    match raw.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok().map(|p| p / 100.0 * scale),
        None => raw.parse::<f64>().ok(),
    }
}

/// Convert a color string to the requested notation.
///
/// Unparseable input is returned unchanged.
pub fn hex_to_format(input: &str, format: ColorFormat) -> String {
    match parse_color(input) {
        Some(rgb) => rgb.format(format),
        None => input.to_string(),
    }
}

/// RGB bytes to hue (degrees), saturation and lightness (0..1).
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (h * 60.0, s, l)
}

/// Hue in degrees, saturation and lightness in 0..1.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = (h.rem_euclid(360.0)) / 360.0;
    if s == 0.0 {
        let v = unit_to_byte(l);
        return (v, v, v);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |mut t: f64| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    (
        unit_to_byte(channel(h + 1.0 / 3.0)),
        unit_to_byte(channel(h)),
        unit_to_byte(channel(h - 1.0 / 3.0)),
    )
}

fn srgb_to_linear(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let s = if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    unit_to_byte(s)
}

/// RGB bytes to OKLCH: lightness (0..1), chroma and hue in degrees.
pub fn rgb_to_oklch(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));

    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let (l_, m_, s_) = (l.cbrt(), m.cbrt(), s.cbrt());

    let ok_l = 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_;
    let ok_a = 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_;
    let ok_b = 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_;

    let c = (ok_a * ok_a + ok_b * ok_b).sqrt();
    // Achromatic colors get a stable hue
    let h = if c < 1e-4 {
        0.0
    } else {
        ok_b.atan2(ok_a).to_degrees().rem_euclid(360.0)
    };
    (ok_l, c, h)
}

/// OKLCH back to clamped sRGB bytes.
pub fn oklch_to_rgb(l: f64, c: f64, h: f64) -> (u8, u8, u8) {
    let hr = h.to_radians();
    let (a, b) = (c * hr.cos(), c * hr.sin());

    let l_ = l + 0.3963377774 * a + 0.2158037573 * b;
    let m_ = l - 0.1055613458 * a - 0.0638541728 * b;
    let s_ = l - 0.0894841775 * a - 1.2914855480 * b;

    let (lc, mc, sc) = (l_.powi(3), m_.powi(3), s_.powi(3));

    let r = 4.0767416621 * lc - 3.3077115913 * mc + 0.2309699292 * sc;
    let g = -1.2684380046 * lc + 2.6097574011 * mc - 0.3413193965 * sc;
    let b = -0.0041960863 * lc - 0.7034186147 * mc + 1.7076147010 * sc;

    (linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hex_formats() {
        assert_eq!(hex_to_format("#ff0000", ColorFormat::Rgb), "rgb(255, 0, 0)");
        assert_eq!(hex_to_format("#ff0000", ColorFormat::Hsl), "hsl(0, 100%, 50%)");
        assert_eq!(hex_to_format("#FF0000", ColorFormat::Hex), "#ff0000");
    }

    #[test]
    fn test_alpha_notations() {
        assert_eq!(
            hex_to_format("#00000080", ColorFormat::Rgb),
            "rgba(0, 0, 0, 0.502)"
        );
        assert_eq!(
            hex_to_format("#00000080", ColorFormat::Hsl),
            "hsla(0, 0%, 0%, 0.502)"
        );
        assert!(hex_to_format("#ff000080", ColorFormat::Oklch).ends_with(" / 0.502)"));
        assert_eq!(rgba_to_hex(1.0, 1.0, 1.0, 0.5), "#ffffff80");
    }

    #[test]
    fn test_oklch_red() {
        let (l, c, h) = rgb_to_oklch(255, 0, 0);
        assert!((l - 0.628).abs() < 0.001);
        assert!((c - 0.2577).abs() < 0.001);
        assert!((h - 29.23).abs() < 0.05);
        assert_eq!(
            hex_to_format("#ff0000", ColorFormat::Oklch),
            "oklch(62.8% 0.2577 29.23)"
        );
    }

    #[test]
    fn test_white_is_achromatic() {
        assert_eq!(hex_to_format("#ffffff", ColorFormat::Oklch), "oklch(100% 0 0)");
    }

    #[test]
    fn test_color_format_names() {
        assert_eq!("RGBA".parse::<ColorFormat>(), Ok(ColorFormat::Rgb));
        let err = "cmyk".parse::<ColorFormat>().unwrap_err();
        assert_eq!(err, TransformError::UnknownColorFormat("cmyk".to_string()));
        assert_eq!(err.to_string(), "unknown color format 'cmyk'");
    }

    #[test]
    fn test_malformed_hex_passthrough() {
        assert_eq!(hex_to_format("#ggg000", ColorFormat::Rgb), "#ggg000");
        assert_eq!(hex_to_format("tomato", ColorFormat::Hsl), "tomato");
        assert_eq!(hex_to_format("#12345", ColorFormat::Rgb), "#12345");
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(hex_to_format("#f00", ColorFormat::Hex), "#ff0000");
    }

    #[test]
    fn test_parse_functional_notations() {
        assert_eq!(parse_color("rgba(255, 0, 0, 0.5)").unwrap().r, 255);
        assert_eq!(parse_color("hsl(120, 100%, 50%)").unwrap(), Rgb::new(0, 255, 0));
        assert_eq!(parse_color("oklch(100% 0 0)").unwrap(), Rgb::new(255, 255, 255));
    }

    fn close(a: &Rgb, b: &Rgb) -> bool {
        let d = |x: u8, y: u8| (i16::from(x) - i16::from(y)).abs() <= 1;
        d(a.r, b.r) && d(a.g, b.g) && d(a.b, b.b) && (a.a - b.a).abs() < 0.01
    }

    proptest! {
        #[test]
        fn prop_round_trip_every_format(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, a in 0u8..=255) {
            let hex = format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a);
            let original = parse_hex(&hex).unwrap();
            for format in [ColorFormat::Hex, ColorFormat::Rgb, ColorFormat::Hsl, ColorFormat::Oklch] {
                let converted = hex_to_format(&hex, format);
                let back = hex_to_format(&converted, ColorFormat::Hex);
                let parsed = parse_hex(&back).unwrap();
                prop_assert!(close(&original, &parsed), "{} -> {} -> {}", hex, converted, back);
            }
        }
    }
}
