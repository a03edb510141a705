//! Replacement templates with capture references.
//!
//! `$N` and `${N}` insert capture `N` (1-based). `${N:modifier}` and
//! `$N:modifier` reshape it first. Supported modifiers are `kebab`, `snake`,
//! `camel`, `pascal`, `lower` and `upper`.

use convert_case::{Boundary, Case, Converter};

/// Casing transform applied to a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Kebab,
    Snake,
    Camel,
    Pascal,
    Lower,
    Upper,
}

impl Modifier {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "kebab" => Some(Modifier::Kebab),
            "snake" => Some(Modifier::Snake),
            "camel" => Some(Modifier::Camel),
            "pascal" => Some(Modifier::Pascal),
            "lower" => Some(Modifier::Lower),
            "upper" => Some(Modifier::Upper),
            _ => None,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        let case = match self {
            Modifier::Lower => return text.to_lowercase(),
            Modifier::Upper => return text.to_uppercase(),
            Modifier::Kebab => Case::Kebab,
            Modifier::Snake => Case::Snake,
            Modifier::Camel => Case::Camel,
            Modifier::Pascal => Case::Pascal,
        };
        // Path segments and explicit separators are the only word breaks
        Converter::new()
            .set_boundaries(&[Boundary::Hyphen, Boundary::Underscore, Boundary::Space])
            .to_case(case)
            .convert(text.replace('/', " "))
    }
}

struct Placeholder<'a> {
    index: usize,
    modifier: Option<&'a str>,
}

impl Placeholder<'_> {
    fn render(&self, captures: &[String]) -> String {
        let Some(capture) = self.index.checked_sub(1).and_then(|i| captures.get(i)) else {
            return String::new();
        };
        match self.modifier.and_then(Modifier::parse) {
            Some(modifier) => modifier.apply(capture),
            None => capture.clone(),
        }
    }
}

/// Parse the text after a `$`. Returns the placeholder and the bytes it used.
fn parse_placeholder(input: &str) -> Option<(Placeholder<'_>, usize)> {
    if let Some(body) = input.strip_prefix('{') {
        let end = body.find('}')?;
        let inner = &body[..end];
        let (index, modifier) = match inner.split_once(':') {
            Some((index, modifier)) => (index, Some(modifier.trim())),
            None => (inner, None),
        };
        let index = index.trim().parse().ok()?;
        return Some((Placeholder { index, modifier }, end + 2));
    }

    let digits = input.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let index = input[..digits].parse().ok()?;
    let mut consumed = digits;
    let mut modifier = None;

    if let Some(tail) = input[digits..].strip_prefix(':') {
        let len = tail.bytes().take_while(u8::is_ascii_alphabetic).count();
        let word = &tail[..len];
        if Modifier::parse(word).is_some() {
            modifier = Some(word);
            consumed += 1 + len;
        }
    }
    Some((Placeholder { index, modifier }, consumed))
}

/// Substitute capture references in `template`.
///
/// Missing captures render as the empty string and unknown modifiers leave
/// the capture untouched. A `$` that starts no placeholder is kept.
pub fn render(template: &str, captures: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match parse_placeholder(after) {
            Some((placeholder, consumed)) => {
                out.push_str(&placeholder.render(captures));
                rest = &after[consumed..];
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
