// Primitives for reading CSV files.

use crate::geo::{io_common::ColumnLayout, *};

pub fn read_csv_rows(path: &str, cfs: &FileSource) -> GeoResult<Vec<RawVoteRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(cfs.csv_delimiter()?)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let header: Vec<String> = rdr
        .headers()
        .context(CsvOpenSnafu { path })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    let layout = ColumnLayout::from_header(&header, path)?;

    let mut res: Vec<RawVoteRow> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        res.push(layout.raw_row(lineno, &cells));
    }
    debug!("read_csv_rows: {}: {} rows", path, res.len());
    Ok(res)
}
