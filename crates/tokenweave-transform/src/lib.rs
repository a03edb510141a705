//! Pure value transforms shared by every tokenweave stage.
//!
//! - [`units`]: number rounding and unit suffixes (`px`, `rem`, ...)
//! - [`color`]: hex canonical form and conversion to RGB, HSL and OKLCH

pub mod color;
pub mod error;
pub mod units;

pub use color::{hex_to_format, parse_color, parse_hex, rgba_to_hex, ColorFormat, Rgb};
pub use error::TransformError;
pub use units::{format_number, format_with_unit, Unit, DEFAULT_PRECISION, DEFAULT_REM_BASE};
