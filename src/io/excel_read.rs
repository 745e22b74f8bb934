use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};

use crate::error::{Result, ToolError};
use crate::model::{Cell, Row};

/// Reads the positional rows of `sheet` below the first `header_rows` rows.
///
/// Columns are addressed from the first column of the sheet, whatever the used
/// range of the sheet is. Rows without any value are dropped.
pub fn read_rows(path: &Path, sheet: &str, header_rows: u32) -> Result<Vec<Row>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = read_required_sheet(&mut workbook, sheet)?;
    Ok(rows_from_range(&range, header_rows))
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn rows_from_range(range: &Range<DataType>, header_rows: u32) -> Vec<Row> {
    let (Some((start_row, _)), Some((end_row, end_col))) = (range.start(), range.end()) else {
        return Vec::new();
    };

    (start_row.max(header_rows)..=end_row)
        .map(|row_idx| {
            (0..=end_col)
                .map(|col_idx| {
                    range
                        .get_value((row_idx, col_idx))
                        .map(cell_from_data)
                        .unwrap_or_default()
                })
                .collect::<Row>()
        })
        .filter(|row| row.iter().any(|cell| !cell.is_blank()))
        .collect()
}

fn cell_from_data(data: &DataType) -> Cell {
    match data {
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Float(value) => Cell::Float(*value),
        DataType::Int(value) => Cell::Integer(*value),
        DataType::Bool(value) => Cell::Bool(*value),
        DataType::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}
