use std::collections::HashMap;

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::lsg::io_common::TableRecord;
use crate::lsg::*;

/// Reads the first worksheet of a workbook. The first row holds the column
/// names.
pub fn read_excel_file(path: &Path) -> LsgResult<Vec<TableRecord>> {
    let p = path.display().to_string();
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path: p.clone() })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu {})?
        .context(OpeningExcelSnafu { path: p.clone() })?;

    let mut rows = wrange.rows();
    let header: Vec<String> = rows
        .next()
        .context(EmptyExcelSnafu {})?
        .iter()
        .map(read_cell)
        .collect();
    debug!("read_excel_file: {}: header: {:?}", p, header);
    Ok(records_from_rows(&header, rows))
}

pub fn records_from_rows<'a, I>(header: &[String], rows: I) -> Vec<TableRecord>
where
    I: Iterator<Item = &'a [DataType]>,
{
    let mut res: Vec<TableRecord> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let fields: HashMap<String, String> = header
            .iter()
            .cloned()
            .zip(row.iter().map(read_cell))
            .collect();
        let record = TableRecord::new(idx + 2, fields);
        if !record.is_blank() {
            res.push(record);
        }
    }
    res
}

// Whole numbers are written without a fractional part, so that codes and
// counts stored as numbers read the same as in a CSV file.
fn read_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => String::new(),
        _ => {
            debug!("read_cell: could not understand cell {:?}", cell);
            String::new()
        }
    }
}
