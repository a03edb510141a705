//! Comment syntax for the text formats.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `/* ... */`
    Block,
    /// `// ...`
    Line,
}

impl CommentStyle {
    pub fn comment(&self, text: &str) -> String {
        match self {
            CommentStyle::Block => format!("/* {} */", text),
            CommentStyle::Line => format!("// {}", text),
        }
    }

    /// The header banner followed by a blank line, or nothing.
    pub fn banner(&self, banner: Option<&str>) -> Vec<String> {
        let Some(banner) = banner.map(str::trim).filter(|b| !b.is_empty()) else {
            return Vec::new();
        };
        let mut lines: Vec<String> = match self {
            CommentStyle::Block if banner.contains('\n') => {
                let mut lines = vec!["/*".to_string()];
                lines.extend(banner.lines().map(|line| format!(" * {}", line).trim_end().to_string()));
                lines.push(" */".to_string());
                lines
            }
            _ => banner.lines().map(|line| self.comment(line).trim_end().to_string()).collect(),
        };
        lines.push(String::new());
        lines
    }
}
