//! Run configuration: the column layout of the mentors sheet, the defaults
//! stamped on every generated entry, and the output formatting.
//!
//! Every field has a default matching the current spreadsheet template, so a
//! configuration file only needs to list what differs.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ToolError};

/// Revision of the spreadsheet template the column schema describes.
pub const SCHEMA_VERSION: u32 = 2;

/// Name of the worksheet holding one row per mentor.
pub const DEFAULT_SHEET: &str = "Mentors";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sheet: String,
    /// Rows at the top of the sheet that hold headers rather than mentors.
    pub header_rows: u32,
    pub columns: ColumnSchema,
    /// Defaults applied in full export mode.
    pub full: RecordDefaults,
    /// Defaults applied to entries added in append mode.
    pub incremental: RecordDefaults,
    pub image: ImageSettings,
    pub indent: IndentStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet: DEFAULT_SHEET.to_string(),
            header_rows: 1,
            columns: ColumnSchema::default(),
            full: RecordDefaults::default(),
            incremental: RecordDefaults {
                disabled: true,
                ..RecordDefaults::default()
            },
            image: ImageSettings::default(),
            indent: IndentStyle::default(),
        }
    }
}

impl Config {
    /// Loads a configuration file, filling unspecified fields with defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let config: Config = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sheet.trim().is_empty() {
            return Err(ToolError::InvalidConfig("sheet name is empty".into()));
        }
        if self.columns.version != SCHEMA_VERSION {
            return Err(ToolError::InvalidConfig(format!(
                "column schema version {} is not supported (expected {SCHEMA_VERSION})",
                self.columns.version
            )));
        }
        for (label, span) in [
            ("areas", self.columns.areas),
            ("focus", self.columns.focus),
            ("programming_languages", self.columns.programming_languages),
        ] {
            if span.start > span.end {
                return Err(ToolError::InvalidConfig(format!(
                    "column span '{label}' starts at {} after its end {}",
                    span.start, span.end
                )));
            }
        }
        self.indent.validate()
    }
}

/// Inclusive range of columns whose non-blank cells form a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ColumnSpan {
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn columns(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Zero-based column positions of the spreadsheet template.
///
/// `version` identifies the template revision the positions belong to and
/// must equal [`SCHEMA_VERSION`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnSchema {
    pub version: u32,
    pub name: usize,
    pub mentorship_type: usize,
    pub location: usize,
    pub languages: usize,
    /// Columns joined with `", "` into `position` (job title, company).
    pub position: Vec<usize>,
    pub experience: usize,
    pub areas: ColumnSpan,
    pub focus: ColumnSpan,
    pub programming_languages: ColumnSpan,
    pub mentee: usize,
    pub bio: usize,
    pub extra: usize,
    pub network: usize,
    pub hours: usize,
    pub image_source: Option<usize>,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            name: 0,
            mentorship_type: 2,
            location: 4,
            languages: 5,
            position: vec![6, 7],
            experience: 8,
            areas: ColumnSpan::new(9, 13),
            focus: ColumnSpan::new(14, 18),
            programming_languages: ColumnSpan::new(19, 23),
            mentee: 24,
            bio: 25,
            extra: 26,
            network: 27,
            hours: 28,
            image_source: Some(33),
        }
    }
}

/// Constant fields stamped on every generated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordDefaults {
    pub disabled: bool,
    pub matched: bool,
    pub sort: i64,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            disabled: false,
            matched: false,
            sort: 10,
        }
    }
}

/// How the `image` field is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageMode {
    /// Always empty.
    Blank,
    /// Path of the asset named after the entry index.
    AssetPath,
    /// Instruction to download the image from the source column, when present.
    #[default]
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageSettings {
    pub mode: ImageMode,
    pub directory: String,
    pub suffix: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            mode: ImageMode::default(),
            directory: "assets/images/mentors".to_string(),
            suffix: ".jpeg".to_string(),
        }
    }
}

impl ImageSettings {
    /// Asset path for the entry with the given index.
    pub fn asset_path(&self, index: u64) -> String {
        let directory = self.directory.trim_end_matches('/');
        if directory.is_empty() {
            format!("{index}{}", self.suffix)
        } else {
            format!("{directory}/{index}{}", self.suffix)
        }
    }
}

/// Indentation of the emitted YAML document.
///
/// `mapping` is the indent of nested mappings, `sequence` the column of
/// sequence item content relative to the parent key, and `offset` the column
/// of the dash relative to the parent key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndentStyle {
    pub mapping: usize,
    pub sequence: usize,
    pub offset: usize,
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self {
            mapping: 2,
            sequence: 4,
            offset: 2,
        }
    }
}

impl IndentStyle {
    pub fn validate(&self) -> Result<()> {
        if self.mapping == 0 {
            return Err(ToolError::InvalidConfig("mapping indent must be positive".into()));
        }
        if self.sequence < self.offset + 2 {
            return Err(ToolError::InvalidConfig(format!(
                "sequence indent {} must leave room for the dash at offset {}",
                self.sequence, self.offset
            )));
        }
        Ok(())
    }

    /// Spaces between the dash and the item content.
    pub fn item_gap(&self) -> usize {
        self.sequence - self.offset
    }
}
