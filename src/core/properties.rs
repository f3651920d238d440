//! Properties file codec.
//!
//! Reads and writes the line-oriented `key=value` format used by message
//! bundles and by the replacement dictionary:
//! - `#` / `!` comment lines, blank lines ignored
//! - `=`, `:` or whitespace separate key from value
//! - trailing odd backslash continues a line
//! - `\t \n \r \f \uXXXX` escapes
//!
//! Entries keep their source order. A repeated key keeps its first position
//! and takes the last value.

use crate::error::{Error, Result};
use crate::utils::io;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyFile {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl PropertyFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key. Overwriting keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].value = value;
            return;
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(Entry { key, value });
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Load and parse a properties file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let text = io::read_text_lossless(path, &format!("read {}", origin))?;
        Self::parse(&text, &origin)
    }

    /// Parse properties text. `origin` names the source in error details.
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        let mut file = Self::new();

        for line in logical_lines(text) {
            let (raw_key, raw_value) = split_key_value(&line.text);
            let key = unescape(raw_key)
                .map_err(|problem| Error::entry_file_malformed(origin, Some(line.number), problem))?;
            let value = unescape(raw_value)
                .map_err(|problem| Error::entry_file_malformed(origin, Some(line.number), problem))?;
            file.insert(key, value);
        }

        Ok(file)
    }

    /// Render as properties text, optionally preceded by a `#` comment line.
    ///
    /// Output is pure ASCII: anything outside printable ASCII becomes `\uXXXX`.
    pub fn render(&self, header: Option<&str>) -> String {
        let mut out = String::new();

        if let Some(header) = header {
            out.push('#');
            out.push_str(&escape(&header.replace(['\r', '\n'], " "), Escape::Comment));
            out.push('\n');
        }

        for entry in &self.entries {
            out.push_str(&escape(&entry.key, Escape::Key));
            out.push('=');
            out.push_str(&escape(&entry.value, Escape::Value));
            out.push('\n');
        }

        out
    }

    pub fn save(&self, path: &Path, header: Option<&str>) -> Result<()> {
        io::write_file(
            path,
            &self.render(header),
            &format!("write {}", path.display()),
        )
    }
}

impl FromIterator<(String, String)> for PropertyFile {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut file = Self::new();
        for (key, value) in iter {
            file.insert(key, value);
        }
        file
    }
}

// ============================================================================
// Reading
// ============================================================================

struct LogicalLine {
    /// 1-indexed natural line the logical line starts on.
    number: usize,
    text: String,
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

/// Split on `\n`, `\r` and `\r\n`.
fn natural_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += 1;
                if i < bytes.len() && bytes[i] == b'\n' {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }

    lines
}

fn ends_with_odd_backslashes(s: &str) -> bool {
    s.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Join continuation lines and drop blanks and comments.
fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let naturals = natural_lines(text);
    let mut lines = Vec::new();
    let mut i = 0;

    while i < naturals.len() {
        let number = i + 1;
        let trimmed = naturals[i].trim_start_matches(is_blank);
        i += 1;

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_odd_backslashes(&logical) {
            logical.pop();
            if i >= naturals.len() {
                break;
            }
            logical.push_str(naturals[i].trim_start_matches(is_blank));
            i += 1;
        }

        lines.push(LogicalLine {
            number,
            text: logical,
        });
    }

    lines
}

/// Split a logical line into its still-escaped key and value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (idx, c) in line.char_indices() {
        if c == '\\' {
            escaped = !escaped;
            continue;
        }
        if !escaped {
            if c == '=' || c == ':' {
                key_end = idx;
                value_start = idx + 1;
                has_separator = true;
                break;
            }
            if is_blank(c) {
                key_end = idx;
                value_start = idx + 1;
                break;
            }
        }
        escaped = false;
    }

    let rest = &line[value_start..];
    let mut offset = 0;
    for c in rest.chars() {
        if is_blank(c) {
            offset += 1;
            continue;
        }
        if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            offset += 1;
            continue;
        }
        break;
    }

    (&line[..key_end], &rest[offset..])
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut utf16: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_utf16(&mut utf16, &mut out);
            out.push(c);
            continue;
        }

        let Some(next) = chars.next() else {
            break;
        };

        if next == 'u' {
            let digits: String = chars.by_ref().take(4).collect();
            let unit = if digits.len() == 4 && digits.chars().all(|d| d.is_ascii_hexdigit()) {
                u16::from_str_radix(&digits, 16).ok()
            } else {
                None
            };
            match unit {
                Some(unit) => utf16.push(unit),
                None => return Err("Malformed \\uxxxx encoding".to_string()),
            }
            continue;
        }

        flush_utf16(&mut utf16, &mut out);
        out.push(match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }

    flush_utf16(&mut utf16, &mut out);
    Ok(out)
}

/// Decode buffered `\u` units, combining surrogate pairs.
fn flush_utf16(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

// ============================================================================
// Writing
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Escape {
    Key,
    Value,
    Comment,
}

fn escape(s: &str, mode: Escape) -> String {
    let mut out = String::with_capacity(s.len() * 2);

    for (i, c) in s.chars().enumerate() {
        match c {
            _ if mode == Escape::Comment && (' '..='~').contains(&c) => out.push(c),
            ' ' if mode == Escape::Key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }

    out
}
