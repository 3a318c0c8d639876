use log::{debug, error, info, warn};

use election_map::*;
use rayon::prelude::*;
use snafu::{prelude::*, Snafu};

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::geo::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_json;
mod io_xlsx;
pub mod map_layer;

#[derive(Debug, Snafu)]
pub enum GeoError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error opening CSV file {path}: {source}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}: {source}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening Excel file {path}: {source}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet or no header row in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Missing column {column} in {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("{path}:{lineno}: {source}"))]
    MalformedRow {
        source: RowError,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Unknown input type {provider:?} for {path}"))]
    UnknownProvider { provider: String, path: String },
    #[snafu(display("No vote file could be loaded"))]
    NoFilesLoaded {},
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type GeoResult<T> = Result<T, GeoError>;

/// A row as read from a file, before any validation.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawVoteRow {
    pub lineno: usize,
    pub state: Option<String>,
    pub round: String,
    pub candidate: String,
    pub votes: String,
}

impl RawVoteRow {
    /// Checks the fields of the row. The state of the file source, when there is one,
    /// takes precedence over the state column.
    pub fn validate(&self, source_state: Option<&str>) -> Result<VoteRow, RowError> {
        let state = source_state.or(self.state.as_deref()).unwrap_or("");
        let round = io_common::parse_int(&self.round)
            .ok_or_else(|| RowError::InvalidRound(self.round.clone()))?;
        let votes = io_common::parse_int(&self.votes)
            .ok_or_else(|| RowError::InvalidVoteCount(self.votes.clone()))?;
        VoteRow::parse(state, round, &self.candidate, votes)
    }
}

/// The outcome of loading one file source.
#[derive(Debug)]
struct LoadedSource {
    rows: Vec<VoteRow>,
    rejected: usize,
}

fn guess_provider(path: &str) -> String {
    match Path::new(path).extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => "json".to_string(),
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => "xlsx".to_string(),
        _ => "csv".to_string(),
    }
}

fn read_raw_rows(path: &str, cfs: &FileSource) -> GeoResult<Vec<RawVoteRow>> {
    info!("Attempting to read vote file {:?}", path);
    match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_rows(path, cfs),
        "json" => io_json::read_json_rows(path),
        "xlsx" => io_xlsx::read_xlsx_rows(path, cfs),
        x => UnknownProviderSnafu { provider: x, path }.fail(),
    }
}

fn load_source(root: &Path, cfs: &FileSource, strict: bool) -> GeoResult<LoadedSource> {
    let p: PathBuf = root.join(&cfs.file_path);
    let path = p.as_path().display().to_string();
    let raw = read_raw_rows(&path, cfs)?;

    let mut rows: Vec<VoteRow> = Vec::with_capacity(raw.len());
    let mut rejected = 0;
    for r in raw.iter() {
        match r.validate(cfs.state.as_deref()) {
            Ok(row) => rows.push(row),
            Err(e) if strict => {
                return Err(e).context(MalformedRowSnafu {
                    path: path.clone(),
                    lineno: r.lineno,
                });
            }
            Err(e) => {
                warn!("{}:{}: skipping row: {}", path, r.lineno, e);
                rejected += 1;
            }
        }
    }
    Ok(LoadedSource { rows, rejected })
}

/// Loads all the file sources.
///
/// Files are read in parallel, each one with its own result. A file that fails is
/// reported and skipped, except for a malformed row in strict mode. The rows are
/// returned in the order of the sources.
pub fn load_sources(root: &Path, sources: &[FileSource], strict: bool) -> GeoResult<Vec<VoteRow>> {
    let results: Vec<(&FileSource, GeoResult<LoadedSource>)> = sources
        .par_iter()
        .map(|cfs| (cfs, load_source(root, cfs, strict)))
        .collect();

    let mut rows: Vec<VoteRow> = Vec::new();
    let mut num_loaded = 0;
    for (cfs, res) in results {
        let name = io_common::simplify_file_name(&cfs.file_path);
        match res {
            Ok(loaded) => {
                info!(
                    "Loaded {}: {} rows, {} rejected",
                    name,
                    loaded.rows.len(),
                    loaded.rejected
                );
                num_loaded += 1;
                rows.extend(loaded.rows);
            }
            Err(e @ GeoError::MalformedRow { .. }) => {
                return Err(e);
            }
            Err(e) => {
                error!("Failed to load {}: {}", name, e);
            }
        }
    }
    if num_loaded == 0 {
        return NoFilesLoadedSnafu {}.fail();
    }
    Ok(rows)
}

/// Drops the excluded pseudo-candidates and sums the votes of each
/// (state, round, candidate).
///
/// The result is ordered by decreasing votes. Equal totals keep the order in
/// which the groups first appeared.
pub fn group_rows(rows: &[VoteRow], excluded: &[String]) -> Vec<VoteRow> {
    let excluded: HashSet<&str> = excluded.iter().map(|s| s.as_str()).collect();
    let mut positions: HashMap<(&StateCode, Round, &str), usize> = HashMap::new();
    let mut grouped: Vec<VoteRow> = Vec::new();
    let mut num_excluded = 0;
    for r in rows.iter() {
        if excluded.contains(r.candidate.as_str()) {
            num_excluded += 1;
            continue;
        }
        let key = (&r.state, r.round, r.candidate.as_str());
        match positions.get(&key) {
            Some(pos) => grouped[*pos].votes += r.votes,
            None => {
                positions.insert(key, grouped.len());
                grouped.push(r.clone());
            }
        }
    }
    debug!(
        "group_rows: {} rows, {} excluded, {} groups",
        rows.len(),
        num_excluded,
        grouped.len()
    );
    grouped.sort_by(|a, b| b.votes.cmp(&a.votes));
    grouped
}

fn candidate_votes_js(l: &[CandidateVotes]) -> Vec<JSValue> {
    l.iter()
        .map(|cv| json!({"candidate": cv.candidate, "votes": cv.votes}))
        .collect()
}

fn states_to_json(index: &ElectionIndex) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for (state, rounds) in index.states.iter() {
        let rounds_js: Vec<JSValue> = rounds
            .iter()
            .map(|(round, agg)| {
                json!({
                    "round": round.number(),
                    "leader": agg.leading_candidate,
                    "leadingVotes": agg.leading_votes,
                    "totalVotes": agg.total_votes,
                    "color": candidate_color(&agg.leading_candidate),
                })
            })
            .collect();
        l.push(json!({
            "state": state.as_str(),
            "region": region_of(state).map(|r| r.name()),
            "rounds": rounds_js,
        }));
    }
    l
}

fn regions_to_json(index: &ElectionIndex) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for (region, rounds) in index.regions.iter() {
        for (round, agg) in rounds.iter() {
            let mut totals: Vec<&(String, u64)> = agg.candidate_totals.iter().collect();
            totals.sort_by(|a, b| b.1.cmp(&a.1));
            let candidates: Vec<JSValue> = totals
                .iter()
                .map(|(name, votes)| json!({"candidate": name, "votes": votes}))
                .collect();
            l.push(json!({
                "region": region.name(),
                "round": round.number(),
                "totalVotes": agg.total_votes(),
                "candidates": candidates,
            }));
        }
    }
    l
}

fn detail_slice_to_json(slice: &DetailSlice) -> JSValue {
    let mut rounds: Vec<JSValue> = Vec::new();
    for round in Round::ALL {
        rounds.push(json!({
            "round": round.number(),
            "ranking": candidate_votes_js(slice.ranking(round)),
            "regionDistribution": candidate_votes_js(slice.region_distribution(round)),
        }));
    }
    let evolution: Vec<JSValue> = slice
        .evolution
        .iter()
        .map(|e| {
            json!({
                "candidate": e.label,
                "round1": e.round_1,
                "round2": e.round_2,
                "color": candidate_color(&e.label),
            })
        })
        .collect();
    json!({
        "state": slice.state.as_str(),
        "region": slice.region.map(|r| r.name()),
        "rounds": rounds,
        "evolution": evolution,
        "totals": {"round1": slice.totals.round_1, "round2": slice.totals.round_2},
    })
}

fn build_summary_js(
    config: &OutputConfig,
    index: &ElectionIndex,
    selections: &[(String, Option<DetailSlice>)],
) -> JSValue {
    let mut selected: JSMap<String, JSValue> = JSMap::new();
    for (code, slice) in selections {
        let js = match slice {
            Some(s) => detail_slice_to_json(s),
            None => JSValue::Null,
        };
        selected.insert(code.clone(), js);
    }
    let unmapped: Vec<&str> = index.unmapped_states.iter().map(|s| s.as_str()).collect();
    json!({
        "config": config,
        "states": states_to_json(index),
        "regions": regions_to_json(index),
        "unmappedStates": unmapped,
        "selection": selected,
    })
}

fn write_output(dest: &str, contents: &str) -> GeoResult<()> {
    if dest == "stdout" {
        println!("{}", contents);
        return Ok(());
    }
    info!("Writing {}", dest);
    fs::write(dest, contents).context(WritingOutputSnafu { path: dest })
}

/// Resolves the configuration and the base directory of the relative paths.
fn resolve_config(args: &Args) -> GeoResult<(DashboardConfig, PathBuf)> {
    let (mut config, mut root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (DashboardConfig::default(), PathBuf::new()),
    };

    if let Some(input) = &args.input {
        let provider = args
            .input_type
            .clone()
            .unwrap_or_else(|| guess_provider(input));
        config.vote_file_sources = vec![FileSource {
            provider,
            file_path: input.clone(),
            state: args.state.clone(),
            excel_worksheet_name: args.excel_worksheet_name.clone(),
            csv_delimiter: args.csv_delimiter.clone(),
        }];
        // The input is given relative to the working directory.
        root = PathBuf::new();
    }
    if config.vote_file_sources.is_empty() {
        whatever!("No vote file to read: use the --input or the --config option");
    }
    Ok((config, root))
}

pub fn run_dashboard(args: &Args) -> GeoResult<()> {
    let (config, root) = resolve_config(args)?;
    info!("config: {:?}", config);

    let rows = load_sources(&root, &config.vote_file_sources, args.strict)?;
    let grouped = group_rows(&rows, &config.excluded_candidates());
    let index = build_index(&grouped);
    if index.is_empty() {
        warn!("No vote left after filtering: every selection will be empty");
    }

    let mut selection = SelectionState::with_references(index, config.reference_candidates());
    let mut selections: Vec<(String, Option<DetailSlice>)> = Vec::new();
    for code in args.select.iter() {
        let state = match StateCode::new(code) {
            Ok(s) => s,
            Err(e) => whatever!("Cannot select {:?}: {}", code, e),
        };
        let slice = selection.select(&state);
        if slice.is_none() {
            warn!("No data for state {}", state);
        }
        selections.push((state.to_string(), slice));
    }

    let output_config = OutputConfig {
        title: config.output_settings.title.clone(),
        year: config.output_settings.year,
        num_files: config.vote_file_sources.len(),
        num_rows: grouped.len(),
    };
    let summary_js = build_summary_js(&output_config, selection.index(), &selections);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {
        path: "summary",
    })?;

    let output_dir: Option<PathBuf> = config
        .output_settings
        .output_directory
        .as_ref()
        .map(|d| root.join(d));
    match (&args.out, &output_dir) {
        (Some(out), _) => write_output(out, &pretty_js_stats)?,
        (None, Some(dir)) => {
            write_output(&dir.join("summary.json").display().to_string(), &pretty_js_stats)?
        }
        (None, None) => write_output("stdout", &pretty_js_stats)?,
    }

    let boundaries_path: Option<String> = args.boundaries.clone().or_else(|| {
        config
            .boundaries_path
            .as_ref()
            .map(|p| root.join(p).display().to_string())
    });
    if let Some(bpath) = boundaries_path {
        let boundaries = read_summary(&bpath)?;
        let layer = map_layer::choropleth_layer(
            &boundaries,
            selection.index(),
            &config.reference_candidates(),
        )?;
        let layer_str =
            serde_json::to_string_pretty(&layer).context(ParsingJsonSnafu { path: bpath })?;
        match (&args.map_out, &output_dir) {
            (Some(out), _) => write_output(out, &layer_str)?,
            (None, Some(dir)) => {
                write_output(&dir.join("map.json").display().to_string(), &layer_str)?
            }
            (None, None) => {
                warn!("No destination for the map layer: use the --map-out option");
            }
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref = serde_json::to_string_pretty(&summary_ref)
            .context(ParsingJsonSnafu { path: summary_p })?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_path(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn row(state: &str, round: i64, candidate: &str, votes: i64) -> VoteRow {
        VoteRow::parse(state, round, candidate, votes).unwrap()
    }

    fn raw(state: Option<&str>, round: &str, candidate: &str, votes: &str) -> RawVoteRow {
        RawVoteRow {
            lineno: 2,
            state: state.map(|s| s.to_string()),
            round: round.to_string(),
            candidate: candidate.to_string(),
            votes: votes.to_string(),
        }
    }

    #[test]
    fn validate_raw_rows() {
        let ok = raw(Some("sp"), "1", "LULA", "10").validate(None).unwrap();
        assert_eq!(ok, row("SP", 1, "LULA", 10));
        let forced = raw(Some("RJ"), "2", "LULA", "10").validate(Some("BA")).unwrap();
        assert_eq!(forced.state.as_str(), "BA");

        assert_eq!(
            raw(Some("SP"), "3", "LULA", "1").validate(None),
            Err(RowError::InvalidRound("3".to_string()))
        );
        assert_eq!(
            raw(Some("SP"), "x", "LULA", "1").validate(None),
            Err(RowError::InvalidRound("x".to_string()))
        );
        assert_eq!(
            raw(Some("SP"), "1", "  ", "1").validate(None),
            Err(RowError::BlankCandidate)
        );
        assert_eq!(
            raw(Some("SP"), "1", "LULA", "-4").validate(None),
            Err(RowError::InvalidVoteCount("-4".to_string()))
        );
        assert_eq!(
            raw(Some("SP"), "1", "LULA", "").validate(None),
            Err(RowError::InvalidVoteCount("".to_string()))
        );
        assert_eq!(
            raw(None, "1", "LULA", "1").validate(None),
            Err(RowError::InvalidStateCode("".to_string()))
        );
        assert_eq!(
            raw(Some("SAO"), "1", "LULA", "1").validate(None),
            Err(RowError::InvalidStateCode("SAO".to_string()))
        );
    }

    #[test]
    fn grouping_sums_and_filters() {
        let rows = vec![
            row("BA", 1, "LULA", 10),
            row("BA", 1, "VOTO NULO", 50),
            row("BA", 1, "BOLSONARO", 4),
            row("BA", 1, "LULA", 15),
            row("BA", 2, "LULA", 30),
            row("BA", 1, "VOTO BRANCO", 8),
            row("SE", 1, "BOLSONARO", 25),
        ];
        let excluded: Vec<String> = DEFAULT_EXCLUDED_CANDIDATES
            .iter()
            .map(|s| s.to_string())
            .collect();
        let grouped = group_rows(&rows, &excluded);
        assert_eq!(
            grouped,
            vec![
                row("BA", 2, "LULA", 30),
                row("BA", 1, "LULA", 25),
                row("SE", 1, "BOLSONARO", 25),
                row("BA", 1, "BOLSONARO", 4),
            ]
        );
    }

    #[test]
    fn guess_provider_from_extension() {
        assert_eq!(guess_provider("a/b.JSON"), "json");
        assert_eq!(guess_provider("b.xlsx"), "xlsx");
        assert_eq!(guess_provider("b.csv"), "csv");
        assert_eq!(guess_provider("b"), "csv");
    }

    #[test]
    fn read_consolidated_csv() {
        let _ = env_logger::try_init();
        let cfs = FileSource {
            provider: "csv".to_string(),
            file_path: data_path("votos_2022.csv"),
            state: None,
            excel_worksheet_name: None,
            csv_delimiter: None,
        };
        let rows = load_sources(Path::new(""), &[cfs], false).unwrap();
        assert_eq!(rows.len(), 9);
        let index = build_index(&group_rows(&rows, &[]));
        let sp = index
            .state(&StateCode::new("SP").unwrap(), Round::First)
            .unwrap();
        assert_eq!(sp.leading_candidate, "LULA");
        assert_eq!(sp.total_votes, 180);
    }

    #[test]
    fn failing_sources_are_skipped() {
        let _ = env_logger::try_init();
        let (config, root) = resolve_config(&Args {
            config: Some(data_path("dashboard_config.json")),
            ..Args::default()
        })
        .unwrap();
        assert_eq!(config.vote_file_sources.len(), 4);
        let rows = load_sources(&root, &config.vote_file_sources, false).unwrap();
        let grouped = group_rows(&rows, &config.excluded_candidates());
        let index = build_index(&grouped);

        // Per-section rows of the raw file are summed, null and blank votes dropped.
        let ba = index
            .state(&StateCode::new("BA").unwrap(), Round::First)
            .unwrap();
        assert_eq!(ba.leading_candidate, "LUIZ INÁCIO LULA DA SILVA");
        assert_eq!(ba.leading_votes, 350);
        assert_eq!(ba.total_votes, 470);
        assert_eq!(ba.rows.len(), 2);

        // Json rows.
        let mg = index
            .state(&StateCode::new("MG").unwrap(), Round::Second)
            .unwrap();
        assert_eq!(mg.leading_candidate, "LULA");
        assert_eq!(mg.total_votes, 410);

        assert!(index.unmapped_states.is_empty());
    }

    #[test]
    fn strict_mode_stops_on_malformed_rows() {
        let cfs = FileSource {
            provider: "csv".to_string(),
            file_path: data_path("malformed.csv"),
            state: None,
            excel_worksheet_name: None,
            csv_delimiter: None,
        };
        let res = load_sources(Path::new(""), &[cfs.clone()], true);
        assert!(matches!(
            res,
            Err(GeoError::MalformedRow { lineno: 3, .. })
        ));
        let rows = load_sources(Path::new(""), &[cfs], false).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn nothing_loaded() {
        let cfs = FileSource {
            provider: "csv".to_string(),
            file_path: data_path("does_not_exist.csv"),
            state: None,
            excel_worksheet_name: None,
            csv_delimiter: None,
        };
        let res = load_sources(Path::new(""), &[cfs], false);
        assert!(matches!(res, Err(GeoError::NoFilesLoaded {})));
    }

    #[test]
    fn unknown_provider() {
        let cfs = FileSource {
            provider: "parquet".to_string(),
            file_path: data_path("votos_2022.csv"),
            state: None,
            excel_worksheet_name: None,
            csv_delimiter: None,
        };
        let res = load_source(Path::new(""), &cfs, false);
        assert!(matches!(res, Err(GeoError::UnknownProvider { .. })));
    }

    #[test]
    fn summary_with_selection() {
        let rows = vec![
            row("SP", 1, "LULA", 100),
            row("SP", 1, "BOLSONARO", 80),
            row("SP", 2, "LULA", 120),
            row("SP", 2, "BOLSONARO", 110),
        ];
        let mut selection = SelectionState::new(build_index(&rows));
        let selections = vec![
            (
                "SP".to_string(),
                selection.select(&StateCode::new("SP").unwrap()),
            ),
            (
                "ZZ".to_string(),
                selection.select(&StateCode::new("ZZ").unwrap()),
            ),
        ];
        let config = OutputConfig {
            title: "test".to_string(),
            year: Some(2022),
            num_files: 1,
            num_rows: 4,
        };
        let js = build_summary_js(&config, selection.index(), &selections);
        assert_eq!(js["states"][0]["state"], "SP");
        assert_eq!(js["states"][0]["region"], "Sudeste");
        assert_eq!(js["states"][0]["rounds"][1]["totalVotes"], 230);
        assert_eq!(js["states"][0]["rounds"][0]["color"], "#c4122d");
        assert_eq!(js["regions"][0]["candidates"][0]["candidate"], "LULA");
        assert_eq!(js["selection"]["ZZ"], JSValue::Null);
        assert_eq!(js["selection"]["SP"]["evolution"][1]["round2"], 110);
        assert_eq!(js["selection"]["SP"]["totals"]["round1"], 180);
        assert_eq!(js["config"]["numRows"], 4);
    }

    #[test]
    fn single_input_with_delimiter() {
        let args = Args {
            input: Some(data_path("SG_UF=BA/votos.csv")),
            state: Some("ba".to_string()),
            csv_delimiter: Some(";".to_string()),
            ..Args::default()
        };
        let (config, root) = resolve_config(&args).unwrap();
        assert_eq!(config.vote_file_sources[0].provider, "csv");
        let rows = load_sources(&root, &config.vote_file_sources, true).unwrap();
        let grouped = group_rows(&rows, &config.excluded_candidates());
        let index = build_index(&grouped);
        let ba = index
            .state(&StateCode::new("BA").unwrap(), Round::Second)
            .unwrap();
        assert_eq!(ba.leading_votes, 260);
        assert_eq!(ba.total_votes, 350);

        // With the default delimiter the header has a single column.
        let (config, root) = resolve_config(&Args {
            csv_delimiter: None,
            ..args
        })
        .unwrap();
        assert!(matches!(
            load_sources(&root, &config.vote_file_sources, true),
            Err(GeoError::NoFilesLoaded {})
        ));
    }

    #[test]
    fn end_to_end_with_reference() {
        let _ = env_logger::try_init();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("summary.json").display().to_string();
        let map_out = dir.path().join("map.json").display().to_string();
        let mut args = Args {
            config: Some(data_path("dashboard_config.json")),
            select: vec!["BA".to_string(), "zz".to_string()],
            out: Some(out.clone()),
            map_out: Some(map_out.clone()),
            ..Args::default()
        };
        run_dashboard(&args).unwrap();

        let summary = read_summary(&out).unwrap();
        assert_eq!(summary["config"]["title"], "Presidente 2022");
        assert_eq!(summary["selection"]["ZZ"], JSValue::Null);
        assert_eq!(summary["selection"]["BA"]["totals"]["round1"], 470);

        let map = read_summary(&map_out).unwrap();
        assert_eq!(map["type"], "FeatureCollection");
        let ba = &map["features"][1]["properties"];
        assert_eq!(ba["leader_round_2"], "LUIZ INÁCIO LULA DA SILVA");
        assert_eq!(ba["fill_round_2"], "#c4122d");
        assert_eq!(map["features"][2]["properties"]["fill_round_1"], NO_DATA_COLOR);

        // The same run checked against its own output.
        args.reference = Some(out.clone());
        args.out = Some(dir.path().join("summary2.json").display().to_string());
        run_dashboard(&args).unwrap();

        // A reference that differs.
        let other = dir.path().join("other.json").display().to_string();
        fs::write(&other, "{}").unwrap();
        args.reference = Some(other);
        assert!(matches!(
            run_dashboard(&args),
            Err(GeoError::ReferenceMismatch {})
        ));
    }

    #[test]
    fn missing_sources() {
        let res = resolve_config(&Args::default());
        assert!(matches!(res, Err(GeoError::Whatever { .. })));
    }
}
