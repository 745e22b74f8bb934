use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::assemble::{ExistingIndex, RowMapper, assemble_full, assemble_incremental};
use crate::config::Config;
use crate::error::{Result, ToolError};
use crate::io::{excel_read, yaml};

/// Rebuilds the mentors document from every row of the sheet.
///
/// Returns the number of entries written.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn export_full(input: &Path, output: &Path, config: &Config) -> Result<usize> {
    let rows = excel_read::read_rows(input, &config.sheet, config.header_rows)?;
    info!(row_count = rows.len(), sheet = %config.sheet, "read mentor rows");

    let mapper = RowMapper::new(&config.columns, config.full, &config.image);
    let records = assemble_full(&rows, &mapper);
    for record in records.iter().filter(|record| record.name.is_empty()) {
        warn!(index = record.index, "mentor row has no name");
    }

    yaml::write_document(output, &records, config.indent)?;
    info!(entry_count = records.len(), "mentors document written");
    Ok(records.len())
}

/// Appends the mentors of the sheet that are not yet listed in `existing`.
///
/// The first `skip_rows` data rows are ignored; they are known to be in the
/// document already. Returns the number of entries appended.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), existing = %existing.display(), skip_rows = skip_rows)
)]
pub fn export_incremental(
    input: &Path,
    existing: &Path,
    skip_rows: usize,
    config: &Config,
) -> Result<usize> {
    if !existing.exists() {
        return Err(ToolError::MissingInput(existing.to_path_buf()));
    }

    let entries = yaml::read_entries(existing)?;
    let index = ExistingIndex::from_entries(&entries);
    if index.is_empty() {
        debug!("existing mentors document lists no named mentors");
    }
    info!(
        mentor_count = index.len(),
        max_index = ?index.max_index(),
        "loaded existing mentors document"
    );

    let rows = excel_read::read_rows(input, &config.sheet, config.header_rows)?;
    let pending: Vec<_> = rows.into_iter().skip(skip_rows).collect();
    debug!(row_count = pending.len(), "rows considered for import");

    let mapper = RowMapper::new(&config.columns, config.incremental, &config.image);
    let records = assemble_incremental(&pending, &index, &mapper);
    if records.is_empty() {
        info!("no new mentors to append");
        return Ok(0);
    }

    yaml::append_document(existing, &records, config.indent)?;
    info!(
        entry_count = records.len(),
        first_index = records[0].index,
        "appended new mentors"
    );
    Ok(records.len())
}
