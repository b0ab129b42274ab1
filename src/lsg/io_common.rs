use std::collections::HashMap;
use std::path::Path;

use crate::lsg::*;

/// One row of a table, keyed by the column names of the header row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TableRecord {
    /// 1-based, the header being line 1.
    pub lineno: usize,
    fields: HashMap<String, String>,
}

impl TableRecord {
    pub fn new(lineno: usize, fields: HashMap<String, String>) -> TableRecord {
        TableRecord { lineno, fields }
    }

    #[cfg(test)]
    pub fn from_pairs<'a, I>(lineno: usize, pairs: I) -> TableRecord
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TableRecord { lineno, fields }
    }

    /// The trimmed value of a column. Missing columns read as empty.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(|s| s.trim()).unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads a count the way spreadsheets write them: integers or floats, with
/// optional `,` or `_` digit grouping. Anything else is zero.
pub fn parse_count(s: &str) -> u64 {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return 0;
    }
    if let Ok(x) = cleaned.parse::<u64>() {
        return x;
    }
    match cleaned.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => f as u64,
        Ok(_) => 0,
        Err(_) => {
            warn!("parse_count: {:?} is not a number, counted as 0", s);
            0
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TableFormat {
    Csv,
    Excel,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> LsgResult<TableFormat> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(TableFormat::Csv),
            "xlsx" | "xlsm" => Ok(TableFormat::Excel),
            _ => UnknownTableFormatSnafu {
                path: path.display().to_string(),
            }
            .fail(),
        }
    }
}

pub fn read_table(path: &Path) -> LsgResult<Vec<TableRecord>> {
    let records = match TableFormat::from_path(path)? {
        TableFormat::Csv => crate::lsg::io_csv::read_csv_file(path)?,
        TableFormat::Excel => crate::lsg::io_excel::read_excel_file(path)?,
    };
    info!(
        "read_table: {}: {} records",
        simplify_file_name(path),
        records.len()
    );
    Ok(records)
}
