// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The label used for a bucket that has not seen a positive vote count yet.
pub const NO_LEADER: &str = "N/A";

/// The two-letter code of a federative unit (`ESTADO`, `SIGLA`).
///
/// The code is always stored in uppercase. A well-formed code is not
/// necessarily one of the 27 known units: see [`crate::region_of`].
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct StateCode(String);

impl StateCode {
    pub fn new(code: &str) -> Result<StateCode, RowError> {
        let normalized = code.trim().to_ascii_uppercase();
        if normalized.len() == 2 && normalized.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(StateCode(normalized))
        } else {
            Err(RowError::InvalidStateCode(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for StateCode {
    type Err = RowError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateCode::new(s)
    }
}

impl Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A round (turno) of the election.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Round {
    First,
    Second,
}

impl Round {
    pub const ALL: [Round; 2] = [Round::First, Round::Second];

    pub fn from_number(n: i64) -> Result<Round, RowError> {
        match n {
            1 => Ok(Round::First),
            2 => Ok(Round::Second),
            x => Err(RowError::InvalidRound(x.to_string())),
        }
    }

    pub fn number(&self) -> u32 {
        match self {
            Round::First => 1,
            Round::Second => 2,
        }
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// One aggregated line of the vote table: the votes of a candidate in a
/// state, for one round.
///
/// Pseudo-candidates (blank and null votes) are expected to be filtered out
/// before rows reach the [`crate::builder::Builder`].
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct VoteRow {
    pub state: StateCode,
    pub round: Round,
    pub candidate: String,
    pub votes: u64,
}

impl VoteRow {
    /// Validates the raw fields of a row.
    ///
    /// The round and vote count are given as signed integers since this is
    /// how most readers surface them. Negative counts are rejected.
    pub fn parse(
        state: &str,
        round: i64,
        candidate: &str,
        votes: i64,
    ) -> Result<VoteRow, RowError> {
        let state = StateCode::new(state)?;
        let round = Round::from_number(round)?;
        if candidate.trim().is_empty() {
            return Err(RowError::BlankCandidate);
        }
        let votes = u64::try_from(votes).map_err(|_| RowError::InvalidVoteCount(votes.to_string()))?;
        Ok(VoteRow {
            state,
            round,
            candidate: candidate.to_string(),
            votes,
        })
    }
}

/// Reasons for rejecting a row at the input boundary.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RowError {
    InvalidStateCode(String),
    InvalidRound(String),
    BlankCandidate,
    InvalidVoteCount(String),
}

impl Error for RowError {}

impl Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::InvalidStateCode(s) => write!(f, "invalid state code {:?}", s),
            RowError::InvalidRound(s) => write!(f, "invalid round {:?} (expected 1 or 2)", s),
            RowError::BlankCandidate => write!(f, "blank candidate name"),
            RowError::InvalidVoteCount(s) => write!(f, "invalid vote count {:?}", s),
        }
    }
}

/// The five geographic regions of Brazil.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Norte,
        Region::Nordeste,
        Region::CentroOeste,
        Region::Sudeste,
        Region::Sul,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::Norte => "Norte",
            Region::Nordeste => "Nordeste",
            Region::CentroOeste => "Centro-Oeste",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ******** Output data structures *********

/// The aggregate of all the rows of one state for one round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StateAggregate {
    pub leading_candidate: String,
    pub leading_votes: u64,
    pub total_votes: u64,
    /// The rows in the order they were received.
    pub rows: Vec<VoteRow>,
}

impl StateAggregate {
    pub(crate) fn empty() -> StateAggregate {
        StateAggregate {
            leading_candidate: NO_LEADER.to_string(),
            leading_votes: 0,
            total_votes: 0,
            rows: Vec::new(),
        }
    }
}

/// Candidate totals accumulated over all the states of one region, for one round.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RegionAggregate {
    /// Unique candidate names, in the order they were first seen.
    pub candidate_totals: Vec<(String, u64)>,
}

impl RegionAggregate {
    pub fn total_votes(&self) -> u64 {
        self.candidate_totals.iter().map(|(_, v)| *v).sum()
    }

    pub fn votes_for(&self, candidate: &str) -> Option<u64> {
        self.candidate_totals
            .iter()
            .find(|(name, _)| name == candidate)
            .map(|(_, v)| *v)
    }
}

/// A candidate and a vote count, as displayed in the detail charts.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateVotes {
    pub candidate: String,
    pub votes: u64,
}

/// A candidate tracked across both rounds in the evolution chart.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReferenceCandidate {
    /// The display label, for example `Lula`.
    pub label: String,
    /// Searched for in the candidate names, ignoring case.
    pub marker: String,
}

impl ReferenceCandidate {
    pub fn new(label: &str, marker: &str) -> ReferenceCandidate {
        ReferenceCandidate {
            label: label.to_string(),
            marker: marker.to_uppercase(),
        }
    }

    /// The two candidates of the 2022 second round.
    pub fn defaults() -> Vec<ReferenceCandidate> {
        vec![
            ReferenceCandidate::new("Lula", "LULA"),
            ReferenceCandidate::new("Bolsonaro", "BOLSONARO"),
        ]
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Evolution {
    pub label: String,
    pub round_1: u64,
    pub round_2: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct RoundTotals {
    pub round_1: u64,
    pub round_2: u64,
}

/// All the views derived for one selected state.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DetailSlice {
    pub state: StateCode,
    pub region: Option<Region>,
    /// Top candidates of the state, indexed by round (first, second).
    pub rankings: [Vec<CandidateVotes>; 2],
    /// Distribution of the votes in the region of the state, indexed by round.
    pub region_distributions: [Vec<CandidateVotes>; 2],
    pub evolution: Vec<Evolution>,
    pub totals: RoundTotals,
}

impl DetailSlice {
    pub fn ranking(&self, round: Round) -> &[CandidateVotes] {
        &self.rankings[round_slot(round)]
    }

    pub fn region_distribution(&self, round: Round) -> &[CandidateVotes] {
        &self.region_distributions[round_slot(round)]
    }
}

pub(crate) fn round_slot(round: Round) -> usize {
    match round {
        Round::First => 0,
        Round::Second => 1,
    }
}
