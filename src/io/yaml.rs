//! Block-style YAML output for mentor entries and read-back of existing
//! documents.
//!
//! `serde_yaml` cannot be told how far to indent sequences, so documents are
//! laid out here while scalar quoting is still left to `serde_yaml`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::config::IndentStyle;
use crate::error::{Result, ToolError};
use crate::model::{MentorRecord, MultilineText, Numeric};

/// Layout tree of a YAML document.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlNode {
    /// Scalar already rendered as a single-line YAML token.
    Scalar(String),
    /// Text emitted as a literal block scalar.
    Literal(String),
    Sequence(Vec<YamlNode>),
    Mapping(Vec<(String, YamlNode)>),
}

impl YamlNode {
    /// Plain or quoted scalar, as `serde_yaml` would write it.
    pub fn scalar<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let rendered = serde_yaml::to_string(value)?;
        Ok(YamlNode::Scalar(rendered.trim_end_matches('\n').to_string()))
    }

    /// Text node; text spanning several lines becomes a literal block.
    /// Text a block scalar cannot carry is double-quoted instead.
    pub fn text(value: &str) -> Result<Self> {
        if needs_escaping(value) {
            Ok(Self::double_quoted(value))
        } else if value.contains('\n') {
            Ok(Self::literal(value))
        } else {
            Self::scalar(value)
        }
    }

    /// Literal block node. Text without any line content, or holding
    /// characters YAML only accepts escaped, is double-quoted instead.
    pub fn literal(value: &str) -> Self {
        if value.trim_end_matches('\n').is_empty() || needs_escaping(value) {
            return Self::double_quoted(value);
        }
        YamlNode::Literal(value.to_string())
    }

    /// Single-line double-quoted scalar using YAML escape sequences.
    pub fn double_quoted(value: &str) -> Self {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for ch in value.chars() {
            match ch {
                '"' => quoted.push_str("\\\""),
                '\\' => quoted.push_str("\\\\"),
                '\n' => quoted.push_str("\\n"),
                '\t' => quoted.push_str("\\t"),
                '\r' => quoted.push_str("\\r"),
                ch if ch.is_control() || ch == '\u{feff}' => {
                    quoted.push_str(&format!("\\u{:04X}", ch as u32));
                }
                ch => quoted.push(ch),
            }
        }
        quoted.push('"');
        YamlNode::Scalar(quoted)
    }

    fn empty() -> Self {
        YamlNode::Scalar("''".to_string())
    }
}

/// Characters other than line feed and tab that YAML does not allow
/// unescaped, so they rule out plain and block styles.
fn needs_escaping(value: &str) -> bool {
    value
        .chars()
        .any(|ch| (ch.is_control() && ch != '\n' && ch != '\t') || ch == '\u{feff}')
}

fn numeric_node(value: Option<Numeric>) -> Result<YamlNode> {
    match value {
        Some(Numeric::Integer(number)) => Ok(YamlNode::Scalar(number.to_string())),
        Some(Numeric::Decimal(number)) => YamlNode::scalar(&number),
        None => Ok(YamlNode::empty()),
    }
}

fn multiline_node(value: &Option<MultilineText>) -> YamlNode {
    match value {
        Some(text) => YamlNode::literal(text.as_str()),
        None => YamlNode::empty(),
    }
}

fn list_node(items: &[String]) -> Result<YamlNode> {
    if items.is_empty() {
        return Ok(YamlNode::empty());
    }
    items
        .iter()
        .map(|item| YamlNode::text(item))
        .collect::<Result<Vec<_>>>()
        .map(YamlNode::Sequence)
}

fn entry(key: &str, value: YamlNode) -> (String, YamlNode) {
    (key.to_string(), value)
}

/// Lays out one mentor entry in the field order the directory site expects.
pub fn record_node(record: &MentorRecord) -> Result<YamlNode> {
    let skills = &record.skills;
    let skills_node = YamlNode::Mapping(vec![
        entry("experience", YamlNode::text(&skills.experience)?),
        entry("years", numeric_node(skills.years)?),
        entry("mentee", multiline_node(&skills.mentee)),
        entry("areas", list_node(&skills.areas)?),
        entry("languages", YamlNode::text(&skills.languages)?),
        entry("focus", list_node(&skills.focus)?),
        entry("extra", multiline_node(&skills.extra)),
    ]);

    let network = record
        .network
        .iter()
        .map(|link| {
            Ok(YamlNode::Mapping(vec![entry(
                link.platform.key(),
                YamlNode::text(&link.url)?,
            )]))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(YamlNode::Mapping(vec![
        entry("name", YamlNode::text(&record.name)?),
        entry("disabled", YamlNode::Scalar(record.disabled.to_string())),
        entry("matched", YamlNode::Scalar(record.matched.to_string())),
        entry("sort", YamlNode::Scalar(record.sort.to_string())),
        entry("hours", numeric_node(record.hours)?),
        entry(
            "type",
            match record.mentorship_type {
                Some(kind) => YamlNode::Scalar(kind.as_str().to_string()),
                None => YamlNode::empty(),
            },
        ),
        entry("index", YamlNode::Scalar(record.index.to_string())),
        entry("location", YamlNode::text(&record.location)?),
        entry("position", YamlNode::text(&record.position)?),
        entry("bio", multiline_node(&record.bio)),
        entry("image", YamlNode::text(&record.image)?),
        entry("languages", YamlNode::text(&record.languages)?),
        entry("skills", skills_node),
        entry("network", YamlNode::Sequence(network)),
    ]))
}

/// Renders `records` as a root sequence whose dashes sit at `root_indent`.
pub fn render_entries(
    records: &[MentorRecord],
    style: IndentStyle,
    root_indent: usize,
) -> Result<String> {
    let items = records.iter().map(record_node).collect::<Result<Vec<_>>>()?;
    let mut emitter = Emitter::new(style);
    if items.is_empty() {
        emitter.pad(root_indent);
        emitter.out.push_str("[]\n");
    } else {
        emitter.write_sequence(&items, root_indent, false);
    }
    Ok(emitter.out)
}

/// Writes a complete document, replacing any previous content.
pub fn write_document(path: &Path, records: &[MentorRecord], style: IndentStyle) -> Result<()> {
    let document = render_entries(records, style, 0)?;
    fs::write(path, document)?;
    Ok(())
}

/// Adds `records` at the end of an existing document, leaving the entries
/// already in it untouched.
pub fn append_document(path: &Path, records: &[MentorRecord], style: IndentStyle) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let existing = fs::read_to_string(path)?;
    let trimmed = existing.trim();
    if trimmed.is_empty() || trimmed == "[]" {
        return write_document(path, records, style);
    }

    let mut fragment = String::new();
    if !existing.ends_with('\n') {
        fragment.push('\n');
    }
    fragment.push_str(&render_entries(records, style, root_indent(&existing))?);

    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(fragment.as_bytes())?;
    Ok(())
}

/// Column of the root sequence dashes in an existing document.
fn root_indent(document: &str) -> usize {
    document
        .lines()
        .map(|line| (line.len() - line.trim_start_matches(' ').len(), line.trim_start()))
        .find(|(_, content)| content.starts_with('-') && !content.starts_with("---"))
        .map(|(indent, _)| indent)
        .unwrap_or(0)
}

/// Loads an existing mentors document as generic mappings.
/// An empty document holds no entries.
pub fn read_entries(path: &Path) -> Result<Vec<Mapping>> {
    let source = fs::read_to_string(path)?;
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_yaml::from_str::<Value>(&source)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(position, item)| match item {
                Value::Mapping(mapping) => Ok(mapping),
                _ => Err(ToolError::InvalidDocument(format!(
                    "entry {position} is not a mapping"
                ))),
            })
            .collect(),
        _ => Err(ToolError::InvalidDocument(
            "expected a sequence of mentor entries".into(),
        )),
    }
}

struct Emitter {
    style: IndentStyle,
    out: String,
}

impl Emitter {
    fn new(style: IndentStyle) -> Self {
        Self {
            style,
            out: String::new(),
        }
    }

    fn pad(&mut self, width: usize) {
        self.out.extend(std::iter::repeat_n(' ', width));
    }

    fn write_mapping(&mut self, entries: &[(String, YamlNode)], indent: usize, inline_first: bool) {
        for (position, (key, value)) in entries.iter().enumerate() {
            if position > 0 || !inline_first {
                self.pad(indent);
            }
            self.out.push_str(key);
            self.out.push(':');
            self.write_value(value, indent);
        }
    }

    fn write_sequence(&mut self, items: &[YamlNode], dash_indent: usize, inline_first: bool) {
        let gap = self.style.item_gap();
        for (position, item) in items.iter().enumerate() {
            if position > 0 || !inline_first {
                self.pad(dash_indent);
            }
            self.out.push('-');
            self.pad(gap - 1);
            self.write_item(item, dash_indent);
        }
    }

    /// Writes a mapping value following `key:`.
    fn write_value(&mut self, value: &YamlNode, key_indent: usize) {
        match value {
            YamlNode::Scalar(token) => {
                self.out.push(' ');
                self.out.push_str(token);
                self.out.push('\n');
            }
            YamlNode::Literal(text) => {
                self.out.push(' ');
                self.write_literal(text, key_indent + self.style.mapping, key_indent);
            }
            YamlNode::Mapping(entries) if entries.is_empty() => self.out.push_str(" {}\n"),
            YamlNode::Mapping(entries) => {
                self.out.push('\n');
                self.write_mapping(entries, key_indent + self.style.mapping, false);
            }
            YamlNode::Sequence(items) if items.is_empty() => self.out.push_str(" []\n"),
            YamlNode::Sequence(items) => {
                self.out.push('\n');
                self.write_sequence(items, key_indent + self.style.offset, false);
            }
        }
    }

    /// Writes a sequence item following its dash.
    fn write_item(&mut self, item: &YamlNode, dash_indent: usize) {
        let content_indent = dash_indent + self.style.item_gap();
        match item {
            YamlNode::Scalar(token) => {
                self.out.push_str(token);
                self.out.push('\n');
            }
            YamlNode::Literal(text) => self.write_literal(text, content_indent, dash_indent),
            YamlNode::Mapping(entries) if entries.is_empty() => self.out.push_str("{}\n"),
            YamlNode::Mapping(entries) => self.write_mapping(entries, content_indent, true),
            YamlNode::Sequence(items) if items.is_empty() => self.out.push_str("[]\n"),
            YamlNode::Sequence(items) => self.write_sequence(items, content_indent, true),
        }
    }

    fn write_literal(&mut self, text: &str, content_indent: usize, parent_indent: usize) {
        let body = text.trim_end_matches('\n');
        let trailing = text.len() - body.len();

        self.out.push('|');
        let first_line = body.split('\n').find(|line| !line.is_empty()).unwrap_or("");
        if first_line.starts_with([' ', '\t']) {
            let indicator = content_indent - parent_indent;
            self.out.push_str(&indicator.to_string());
        }
        self.out.push_str(match trailing {
            0 => "-",
            1 => "",
            _ => "+",
        });
        self.out.push('\n');

        for line in body.split('\n') {
            if !line.is_empty() {
                self.pad(content_indent);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
        for _ in 1..trailing {
            self.out.push('\n');
        }
    }
}
