//! Row-to-entry mapping and the two batch modes.

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::config::{ColumnSchema, ImageMode, ImageSettings, RecordDefaults};
use crate::model::{Cell, MentorRecord, Row, Skills};
use crate::normalize::{
    cell, classify_mentorship_type, classify_network_links, collect_range, extract_number,
    preserve_multiline,
};

/// Maps sheet rows to mentor entries using a fixed column schema.
#[derive(Debug, Clone)]
pub struct RowMapper<'a> {
    schema: &'a ColumnSchema,
    defaults: RecordDefaults,
    image: &'a ImageSettings,
}

impl<'a> RowMapper<'a> {
    pub fn new(
        schema: &'a ColumnSchema,
        defaults: RecordDefaults,
        image: &'a ImageSettings,
    ) -> Self {
        Self {
            schema,
            defaults,
            image,
        }
    }

    /// Name of the mentor described by `row`, as written in the sheet.
    pub fn name(&self, row: &[Cell]) -> String {
        cell(row, self.schema.name).text_or_empty()
    }

    pub fn map(&self, row: &[Cell], index: u64) -> MentorRecord {
        let schema = self.schema;
        let text = |column: usize| cell(row, column).text_or_empty();

        let position = schema
            .position
            .iter()
            .filter_map(|column| cell(row, *column).text())
            .collect::<Vec<_>>()
            .join(", ");

        let skills = Skills {
            experience: text(schema.experience),
            years: extract_number(cell(row, schema.experience)),
            mentee: preserve_multiline(cell(row, schema.mentee)),
            areas: collect_range(row, schema.areas),
            languages: collect_range(row, schema.programming_languages).join(", "),
            focus: collect_range(row, schema.focus),
            extra: preserve_multiline(cell(row, schema.extra)),
        };

        MentorRecord {
            name: self.name(row),
            disabled: self.defaults.disabled,
            matched: self.defaults.matched,
            sort: self.defaults.sort,
            hours: extract_number(cell(row, schema.hours)),
            mentorship_type: classify_mentorship_type(&text(schema.mentorship_type)),
            index,
            location: text(schema.location),
            position,
            bio: preserve_multiline(cell(row, schema.bio)),
            image: self.image_for(row, index),
            languages: text(schema.languages),
            skills,
            network: classify_network_links(&text(schema.network)),
        }
    }

    fn image_for(&self, row: &[Cell], index: u64) -> String {
        match self.image.mode {
            ImageMode::Blank => String::new(),
            ImageMode::AssetPath => self.image.asset_path(index),
            ImageMode::Placeholder => self
                .schema
                .image_source
                .and_then(|column| cell(row, column).text())
                .map(|url| {
                    format!(
                        "Download {} and save it as {}",
                        url.trim(),
                        self.image.asset_path(index)
                    )
                })
                .unwrap_or_default(),
        }
    }
}

/// Builds one entry per row, numbered from 1 in row order.
pub fn assemble_full(rows: &[Row], mapper: &RowMapper<'_>) -> Vec<MentorRecord> {
    rows.iter()
        .zip(1u64..)
        .map(|(row, index)| mapper.map(row, index))
        .collect()
}

/// Names and indices already present in a mentors document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingIndex {
    names: HashSet<String>,
    max_index: Option<u64>,
}

impl ExistingIndex {
    /// Summarises the entries of a previously written document. Entries
    /// without a name or an integer index only contribute what they have.
    pub fn from_entries(entries: &[Mapping]) -> Self {
        let mut existing = Self::default();
        for entry in entries {
            match entry.get("name").and_then(Value::as_str) {
                Some(name) => existing.insert_name(name),
                None => warn!("existing entry has no name"),
            }
            if let Some(index) = entry.get("index").and_then(Value::as_u64) {
                existing.max_index = existing.max_index.max(Some(index));
            }
        }
        existing
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(&name_key(name))
    }

    pub fn max_index(&self) -> Option<u64> {
        self.max_index
    }

    /// First index available for new entries.
    pub fn next_index(&self) -> u64 {
        self.max_index.map_or(1, |index| index + 1)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn insert_name(&mut self, name: &str) {
        self.names.insert(name_key(name));
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Builds entries only for rows whose name is not in `existing`, numbering
/// them consecutively after the largest existing index. A name repeated in
/// `rows` is imported once.
pub fn assemble_incremental(
    rows: &[Row],
    existing: &ExistingIndex,
    mapper: &RowMapper<'_>,
) -> Vec<MentorRecord> {
    let mut seen = existing.clone();
    let mut next_index = existing.next_index();
    let mut batch = Vec::new();

    for row in rows {
        let name = mapper.name(row);
        if seen.contains_name(&name) {
            debug!(%name, "skipping mentor already present");
            continue;
        }
        batch.push(mapper.map(row, next_index));
        seen.insert_name(&name);
        next_index += 1;
    }

    batch
}
