// Primitives for reading CSV files.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use crate::lsg::io_common::TableRecord;
use crate::lsg::*;

/// Reads a CSV table with a header row. Lines that cannot be parsed and
/// blank lines are skipped.
pub fn read_csv_records<R: Read>(reader: R, source: &str) -> LsgResult<Vec<TableRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvHeaderSnafu { path: source })?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    debug!("read_csv_records: {}: header: {:?}", source, headers);

    let mut res: Vec<TableRecord> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let lineno = idx + 2;
        let line = match line_r {
            Ok(line) => line,
            Err(e) => {
                warn!("read_csv_records: {}:{}: skipping line: {}", source, lineno, e);
                continue;
            }
        };
        let fields: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(line.iter().map(|s| s.to_string()))
            .collect();
        let record = TableRecord::new(lineno, fields);
        if record.is_blank() {
            continue;
        }
        res.push(record);
    }
    Ok(res)
}

pub fn read_csv_file(path: &Path) -> LsgResult<Vec<TableRecord>> {
    let p = path.display().to_string();
    let f = File::open(path).context(OpeningFileSnafu { path: p.clone() })?;
    read_csv_records(f, &p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_keyed_by_header() {
        let data = "\u{feff}Party, Party Group\nCPI(M),LDF\n\n,\nINC,UDF,extra\nBJP\n";
        let records = read_csv_records(data.as_bytes(), "test").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("Party"), "CPI(M)");
        assert_eq!(records[0].get("Party Group"), "LDF");
        assert_eq!(records[1].get("Party Group"), "UDF");
        // Short lines leave the last columns empty.
        assert_eq!(records[2].get("Party"), "BJP");
        assert_eq!(records[2].get("Party Group"), "");
    }

    #[test]
    fn quoted_fields() {
        let data = "LB_Code,Candidate_Name,Votes\nG01,\"Nair, Anil\",\"1,204\"\n";
        let records = read_csv_records(data.as_bytes(), "test").unwrap();
        assert_eq!(records[0].get("Candidate_Name"), "Nair, Anil");
        assert_eq!(records[0].lineno, 2);
        assert_eq!(
            crate::lsg::io_common::parse_count(records[0].get("Votes")),
            1204
        );
    }

    #[test]
    fn missing_file() {
        let res = read_csv_file(Path::new("/nonexistent/lsg/wards.csv"));
        assert!(matches!(res, Err(LsgError::OpeningFile { .. })));
    }
}
