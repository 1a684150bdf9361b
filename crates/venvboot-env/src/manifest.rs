//! Requirements manifest reader (`requirements.txt` format).
//!
//! Only enough of the format is understood to count and list entries; the
//! installer itself always receives the file unchanged via `-r`.

use serde::Serialize;
use std::path::Path;

use crate::error::ManifestError;

/// One logical manifest line (continuations joined, comments removed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub line: String,
    /// Project name for package lines; `None` for option lines such as
    /// `-r other.txt`, `-e .` or `--index-url ...`.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Requirements {
    entries: Vec<Requirement>,
}

impl Requirements {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();
        let mut pending = String::new();
        for raw in content.lines() {
            // A comment line ends any continuation, even if it ends in `\`.
            if raw.trim_start().starts_with('#') {
                pending.push(' ');
                pending.push_str(raw);
                flush(&mut pending, &mut entries);
                continue;
            }
            // A trailing backslash continues the logical line.
            if let Some(head) = raw.strip_suffix('\\') {
                pending.push_str(head);
                continue;
            }
            pending.push_str(raw);
            flush(&mut pending, &mut entries);
        }
        flush(&mut pending, &mut entries);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.iter()
    }

    pub fn package_names(&self) -> Vec<&str> {
        self.entries.iter().filter_map(|r| r.name.as_deref()).collect()
    }
}

fn flush(pending: &mut String, entries: &mut Vec<Requirement>) {
    if let Some(req) = parse_line(pending) {
        entries.push(req);
    }
    pending.clear();
}

fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    // pip treats `#` as a comment only at line start or after whitespace,
    // so URL fragments like `pkg @ https://host/x.whl#sha256=...` survive.
    let bytes = line.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'#' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return &line[..i];
        }
    }
    line
}

fn parse_line(raw: &str) -> Option<Requirement> {
    let line = strip_comment(raw).trim();
    if line.is_empty() {
        return None;
    }
    let name = if line.starts_with('-') {
        None
    } else {
        let end = line
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(line.len());
        let name = &line[..end];
        (!name.is_empty()).then(|| name.to_string())
    };
    Some(Requirement {
        line: line.to_string(),
        name,
    })
}
