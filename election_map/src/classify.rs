/// The visual category of a candidate on the map and in the charts.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum CandidateCategory {
    Lula,
    Bolsonaro,
    Ciro,
    Tebet,
    Soraya,
    DAvila,
    /// The synthetic entry grouping the smaller candidates.
    Outros,
    /// Any other candidate.
    Other,
}

/// The color of a state with no data for the displayed round.
pub const NO_DATA_COLOR: &str = "#eeeeee";

// Checked in order: the first marker found in the name wins.
const MARKERS: [(&str, CandidateCategory); 7] = [
    ("LULA", CandidateCategory::Lula),
    ("BOLSONARO", CandidateCategory::Bolsonaro),
    ("CIRO", CandidateCategory::Ciro),
    ("TEBET", CandidateCategory::Tebet),
    ("SORAYA", CandidateCategory::Soraya),
    ("D'AVILA", CandidateCategory::DAvila),
    ("OUTROS", CandidateCategory::Outros),
];

impl CandidateCategory {
    pub fn color(&self) -> &'static str {
        match self {
            CandidateCategory::Lula => "#c4122d",
            CandidateCategory::Bolsonaro => "#002f6c",
            CandidateCategory::Ciro => "#9d2cb0",
            CandidateCategory::Tebet => "#eeb307",
            CandidateCategory::Soraya => "#00a859",
            CandidateCategory::DAvila => "#ff6600",
            CandidateCategory::Outros => "#999999",
            CandidateCategory::Other => "#6c757d",
        }
    }
}

/// Maps a candidate display name to its category.
///
/// The match is a case-insensitive substring search. A name mentioning
/// several known candidates gets the category of the first marker in the
/// order Lula, Bolsonaro, Ciro, Tebet, Soraya, D'Avila, Outros.
///
/// ```
/// use election_map::{classify, CandidateCategory};
///
/// assert_eq!(classify("Luiz Inácio LULA da Silva"), CandidateCategory::Lula);
/// assert_eq!(classify("Padre Kelmon"), CandidateCategory::Other);
/// ```
pub fn classify(candidate: &str) -> CandidateCategory {
    let name = candidate.to_uppercase();
    MARKERS
        .iter()
        .find(|(marker, _)| name.contains(marker))
        .map(|(_, category)| *category)
        .unwrap_or(CandidateCategory::Other)
}

/// Shortcut for the display color of a candidate.
pub fn candidate_color(candidate: &str) -> &'static str {
    classify(candidate).color()
}
