//! Rule-driven variable naming.
//!
//! Rules are tried in order and the first enabled rule whose pattern matches
//! wins. Without a match the default transform applies. The prefix is
//! prepended as `prefix-name` unless the replacement places it through the
//! `{prefix}` placeholder.

use tokenweave_core::{slugify, NameFormatRule};

use crate::glob::{compile, GlobMatcher};
use crate::template::render;

/// Placeholder for the configured prefix inside a replacement.
pub const PREFIX_PLACEHOLDER: &str = "{prefix}";

/// Lowercase, turn `/`, whitespace and camel boundaries into `-`, strip
/// anything outside `[a-z0-9-]`.
pub fn default_transform(name: &str) -> String {
    slugify(name)
}

/// The built-in rule set: kebab-case the whole name behind the prefix.
pub fn default_name_format_rules() -> Vec<NameFormatRule> {
    vec![NameFormatRule::new("**", "{prefix}-${1:kebab}")]
}

#[derive(Debug, Clone)]
struct CompiledRule {
    matcher: GlobMatcher,
    replacement: String,
}

/// Name formatter with its rules compiled once.
#[derive(Debug, Clone)]
pub struct NameFormatter {
    rules: Vec<CompiledRule>,
    prefix: String,
}

impl NameFormatter {
    /// Compile the enabled rules. Rules with invalid patterns are skipped.
    pub fn new(rules: &[NameFormatRule], prefix: &str) -> Self {
        let rules = rules
            .iter()
            .filter(|rule| rule.enabled)
            .filter_map(|rule| match compile(&rule.pattern) {
                Ok(matcher) => Some(CompiledRule {
                    matcher,
                    replacement: rule.replacement.clone(),
                }),
                Err(e) => {
                    log::warn!("skipping name format rule: {}", e);
                    None
                }
            })
            .collect();

        Self {
            rules,
            prefix: prefix.trim().trim_end_matches('-').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Format a raw slash-delimited name.
    pub fn format(&self, raw: &str) -> String {
        for rule in &self.rules {
            if let Some(captures) = rule.matcher.captures(raw) {
                let rendered = render(&rule.replacement, &captures);
                return self.place_prefix(&rendered, rule.replacement.contains(PREFIX_PLACEHOLDER));
            }
        }
        self.place_prefix(&default_transform(raw), false)
    }

    fn place_prefix(&self, name: &str, has_placeholder: bool) -> String {
        if has_placeholder {
            let placed = name.replace(PREFIX_PLACEHOLDER, &self.prefix);
            return if self.prefix.is_empty() {
                placed.trim_start_matches('-').to_string()
            } else {
                placed
            };
        }
        if self.prefix.is_empty() || name.is_empty() {
            name.to_string()
        } else {
            format!("{}-{}", self.prefix, name)
        }
    }
}

/// One-shot formatting of a single name.
pub fn format_name(raw: &str, rules: &[NameFormatRule], prefix: &str) -> String {
    NameFormatter::new(rules, prefix).format(raw)
}
