use crate::geo::*;

use serde::{Deserialize, Serialize};

/// The pseudo-candidates dropped when no list is provided.
pub const DEFAULT_EXCLUDED_CANDIDATES: [&str; 2] = ["VOTO NULO", "VOTO BRANCO"];

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    pub year: Option<u32>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: String,
    pub year: Option<u32>,
    #[serde(rename = "numFiles")]
    pub num_files: usize,
    #[serde(rename = "numRows")]
    pub num_rows: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// Overrides the state of every row of the file.
    pub state: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "csvDelimiter")]
    pub csv_delimiter: Option<String>,
}

impl FileSource {
    pub fn csv_delimiter(&self) -> GeoResult<u8> {
        match self.csv_delimiter.as_deref() {
            None => Ok(b','),
            Some(s) if s.len() == 1 => Ok(s.as_bytes()[0]),
            Some(s) => whatever!("csvDelimiter must be a single character, got {:?}", s),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceCandidateConfig {
    pub label: String,
    pub marker: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "voteFileSources", default)]
    pub vote_file_sources: Vec<FileSource>,
    #[serde(rename = "excludedCandidates")]
    pub excluded_candidates: Option<Vec<String>>,
    #[serde(rename = "referenceCandidates")]
    pub reference_candidates: Option<Vec<ReferenceCandidateConfig>>,
    #[serde(rename = "boundariesPath")]
    pub boundaries_path: Option<String>,
}

impl DashboardConfig {
    pub fn excluded_candidates(&self) -> Vec<String> {
        match &self.excluded_candidates {
            Some(l) => l.clone(),
            None => DEFAULT_EXCLUDED_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn reference_candidates(&self) -> Vec<ReferenceCandidate> {
        match &self.reference_candidates {
            Some(l) => l
                .iter()
                .map(|rc| ReferenceCandidate::new(&rc.label, &rc.marker))
                .collect(),
            None => ReferenceCandidate::defaults(),
        }
    }
}

pub fn read_config(path: &str) -> GeoResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> GeoResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}
