// Reads an array of row objects, as exported by the query engine.

use crate::geo::io_common::{CANDIDATE_COLUMNS, ROUND_COLUMNS, STATE_COLUMNS, VOTES_COLUMNS};
use crate::geo::*;

pub fn read_json_rows(path: &str) -> GeoResult<Vec<RawVoteRow>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let objects: Vec<JSMap<String, JSValue>> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;

    let res: Vec<RawVoteRow> = objects
        .iter()
        .enumerate()
        .map(|(idx, obj)| RawVoteRow {
            lineno: idx + 1,
            state: field(obj, &STATE_COLUMNS),
            round: field(obj, &ROUND_COLUMNS).unwrap_or_default(),
            candidate: field(obj, &CANDIDATE_COLUMNS).unwrap_or_default(),
            votes: field(obj, &VOTES_COLUMNS).unwrap_or_default(),
        })
        .collect();
    debug!("read_json_rows: {}: {} rows", path, res.len());
    Ok(res)
}

// Numbers and strings are both accepted. Nulls count as missing.
fn field(obj: &JSMap<String, JSValue>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|n| obj.get(*n))
        .and_then(|v| match v {
            JSValue::String(s) => Some(s.clone()),
            JSValue::Number(n) => Some(n.to_string()),
            JSValue::Bool(b) => Some(b.to_string()),
            _ => None,
        })
}
