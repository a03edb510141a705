//! Glob patterns over slash-delimited variable names.
//!
//! | Token | Matches                                   |
//! |-------|-------------------------------------------|
//! | `*`   | exactly one path segment (captured)       |
//! | `**`  | zero or more segments (captured, greedy)  |
//! | other | itself, case-insensitively                |
//!
//! A `*` inside a longer segment (`btn-*`) matches the rest of that segment.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlobError {
    #[error("empty glob pattern")]
    Empty,

    #[error("invalid glob pattern '{pattern}': {reason}")]
    Invalid { pattern: String, reason: String },
}

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    pattern: String,
    regex: Regex,
}

/// Compile a glob pattern into a case-insensitive matcher.
pub fn compile(pattern: &str) -> Result<GlobMatcher, GlobError> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Err(GlobError::Empty);
    }
    if pattern.contains("***") {
        return Err(GlobError::Invalid {
            pattern: pattern.to_string(),
            reason: "'***' is not a valid wildcard".to_string(),
        });
    }

    let segments: Vec<&str> = pattern.split('/').collect();
    let mut source = String::from("(?i)^");

    if segments == ["**"] {
        source.push_str("(.*)");
    } else {
        let mut needs_separator = false;
        for (i, segment) in segments.iter().enumerate() {
            if *segment == "**" {
                if i == 0 {
                    source.push_str("(?:(.+)/)?");
                    needs_separator = false;
                } else {
                    source.push_str("(?:/(.+))?");
                    needs_separator = true;
                }
                continue;
            }
            if segment.contains("**") {
                return Err(GlobError::Invalid {
                    pattern: pattern.to_string(),
                    reason: format!("'**' must be a whole segment, found '{}'", segment),
                });
            }
            if needs_separator {
                source.push('/');
            }
            source.push_str(&compile_segment(segment));
            needs_separator = true;
        }
    }
    source.push('$');

    let regex = Regex::new(&source).map_err(|e| GlobError::Invalid {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    Ok(GlobMatcher {
        pattern: pattern.to_string(),
        regex,
    })
}

fn compile_segment(segment: &str) -> String {
    if segment == "*" {
        return "([^/]+)".to_string();
    }
    segment
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("([^/]*)")
}

impl GlobMatcher {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Wildcard captures in pattern order, or `None` when `name` does not match.
    ///
    /// An optional `**` that matched nothing yields an empty capture.
    pub fn captures(&self, name: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(name)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_segment_wildcards() {
        let glob = compile("color/*/alpha/*").unwrap();
        assert_eq!(glob.captures("color/teal/alpha/2").unwrap(), vec!["teal", "2"]);
        assert!(glob.is_match("Color/Teal/ALPHA/2"));
        assert!(!glob.is_match("color/teal/dark/alpha/2"));
        assert!(!glob.is_match("color/teal/alpha"));
    }

    #[test]
    fn test_double_star_alone() {
        let glob = compile("**").unwrap();
        assert_eq!(glob.captures("a/b/c").unwrap(), vec!["a/b/c"]);
    }

    #[test]
    fn test_leading_double_star() {
        let glob = compile("**/primary").unwrap();
        assert_eq!(glob.captures("primary").unwrap(), vec![""]);
        assert_eq!(glob.captures("brand/color/primary").unwrap(), vec!["brand/color"]);
        assert!(!glob.is_match("xprimary"));
    }

    #[test]
    fn test_trailing_and_middle_double_star() {
        let glob = compile("color/**").unwrap();
        assert_eq!(glob.captures("color").unwrap(), vec![""]);
        assert_eq!(glob.captures("color/brand/primary").unwrap(), vec!["brand/primary"]);

        let glob = compile("color/**/500").unwrap();
        assert!(glob.is_match("color/500"));
        assert_eq!(glob.captures("color/blue/light/500").unwrap(), vec!["blue/light"]);
    }

    #[test]
    fn test_partial_segment_wildcard() {
        let glob = compile("btn-*").unwrap();
        assert_eq!(glob.captures("btn-primary").unwrap(), vec!["primary"]);
        assert!(!glob.is_match("btn-primary/hover"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let glob = compile("size.(sm)").unwrap();
        assert!(glob.is_match("size.(sm)"));
        assert!(!glob.is_match("sizex(sm)"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert_eq!(compile("  ").unwrap_err(), GlobError::Empty);
        assert!(matches!(compile("color/***"), Err(GlobError::Invalid { .. })));
        assert!(matches!(compile("color/a**"), Err(GlobError::Invalid { .. })));
    }
}
