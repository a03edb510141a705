//! Numeric unit formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Root font size used when nothing else is configured.
pub const DEFAULT_REM_BASE: f64 = 16.0;

/// Decimal places kept when no precision is configured.
pub const DEFAULT_PRECISION: u8 = 4;

/// Output units for numeric tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Bare number
    None,
    /// Pixels (the host's native unit)
    #[default]
    Px,
    /// Relative to the root font size
    Rem,
    /// Relative to the element font size
    Em,
    /// Percentage
    #[serde(rename = "%", alias = "percent")]
    Percent,
    /// Viewport width
    Vw,
    /// Viewport height
    Vh,
    /// Milliseconds
    Ms,
    /// Seconds
    S,
}

impl Unit {
    /// CSS suffix for this unit.
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Px => "px",
            Unit::Rem => "rem",
            Unit::Em => "em",
            Unit::Percent => "%",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Ms => "ms",
            Unit::S => "s",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::None => write!(f, "none"),
            other => write!(f, "{}", other.suffix()),
        }
    }
}

impl FromStr for Unit {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Unit::None),
            "px" => Ok(Unit::Px),
            "rem" => Ok(Unit::Rem),
            "em" => Ok(Unit::Em),
            "%" | "percent" => Ok(Unit::Percent),
            "vw" => Ok(Unit::Vw),
            "vh" => Ok(Unit::Vh),
            "ms" => Ok(Unit::Ms),
            "s" => Ok(Unit::S),
            other => Err(TransformError::UnknownUnit(other.to_string())),
        }
    }
}

/// Round `value` to `precision` decimal places and print it without
/// trailing zeros.
pub fn format_number(value: f64, precision: u8) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let factor = 10f64.powi(i32::from(precision));
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Format a pixel-equivalent number in the given unit.
///
/// Only `rem` converts the magnitude; every other unit is a suffix. Scaling
/// stored fractions for `%` is the caller's job.
pub fn format_with_unit(value: f64, unit: Unit, rem_base: f64, precision: u8) -> String {
    match unit {
        Unit::None => format_number(value, precision),
        Unit::Rem => {
            let base = if rem_base > 0.0 { rem_base } else { DEFAULT_REM_BASE };
            format!("{}rem", format_number(value / base, precision))
        }
        other => format!("{}{}", format_number(value, precision), other.suffix()),
    }
}
