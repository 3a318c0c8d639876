use crate::geo::*;

use std::path::Path;

// Accepted names for each column: the consolidated table first, then the
// names used in the raw files of the electoral court.
pub(crate) const STATE_COLUMNS: [&str; 2] = ["ESTADO", "SG_UF"];
pub(crate) const ROUND_COLUMNS: [&str; 2] = ["TURNO", "NR_TURNO"];
pub(crate) const CANDIDATE_COLUMNS: [&str; 2] = ["CANDIDATO", "NM_VOTAVEL"];
pub(crate) const VOTES_COLUMNS: [&str; 3] = ["TOTAL_VOTOS", "VOTOS", "QT_VOTOS"];

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The position of each column of interest in a header row.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnLayout {
    pub state: Option<usize>,
    pub round: usize,
    pub candidate: usize,
    pub votes: usize,
}

impl ColumnLayout {
    pub fn from_header(header: &[String], path: &str) -> GeoResult<ColumnLayout> {
        let names: Vec<String> = header.iter().map(|s| s.trim().to_uppercase()).collect();
        let find = |candidates: &[&str]| -> Option<usize> {
            candidates
                .iter()
                .find_map(|c| names.iter().position(|n| n == c))
        };
        let required = |candidates: &[&str]| -> GeoResult<usize> {
            find(candidates).context(MissingColumnSnafu {
                column: candidates[0],
                path,
            })
        };
        let layout = ColumnLayout {
            state: find(&STATE_COLUMNS),
            round: required(&ROUND_COLUMNS)?,
            candidate: required(&CANDIDATE_COLUMNS)?,
            votes: required(&VOTES_COLUMNS)?,
        };
        debug!("ColumnLayout: {}: {:?}", path, layout);
        Ok(layout)
    }

    /// Picks the fields of a row. Missing cells are read as empty.
    pub fn raw_row(&self, lineno: usize, cells: &[String]) -> RawVoteRow {
        let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
        RawVoteRow {
            lineno,
            state: self.state.map(cell),
            round: cell(self.round),
            candidate: cell(self.candidate),
            votes: cell(self.votes),
        }
    }
}

/// Parses an integer cell. Spreadsheets and JSON exports sometimes write
/// whole numbers with a trailing `.0`.
pub fn parse_int(s: &str) -> Option<i64> {
    let t = s.trim();
    if let Ok(x) = t.parse::<i64>() {
        return Some(x);
    }
    match t.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Some(f as i64),
        _ => None,
    }
}
