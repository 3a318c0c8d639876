use crate::builder::ElectionIndex;
use crate::config::*;
use crate::regions::region_of;

use log::{debug, info};

/// Number of candidates shown in the ranking of a state.
pub const RANKING_SIZE: usize = 5;
/// Number of candidates kept individually in a region distribution.
pub const REGION_TOP: usize = 3;
/// The label of the entry grouping the remaining candidates of a region.
pub const OTHERS_LABEL: &str = "OUTROS";

/// The currently loaded dataset and the state selected in it.
///
/// Owned by the caller. Loading a new index discards the previous one and
/// the selection together.
#[derive(Debug, Clone)]
pub struct SelectionState {
    index: ElectionIndex,
    references: Vec<ReferenceCandidate>,
    selected: Option<StateCode>,
}

impl SelectionState {
    pub fn new(index: ElectionIndex) -> SelectionState {
        SelectionState::with_references(index, ReferenceCandidate::defaults())
    }

    pub fn with_references(
        index: ElectionIndex,
        references: Vec<ReferenceCandidate>,
    ) -> SelectionState {
        SelectionState {
            index,
            references,
            selected: None,
        }
    }

    /// Replaces the dataset and clears the selection.
    pub fn load(&mut self, index: ElectionIndex) {
        info!("Loading a new index with {} states", index.states.len());
        self.index = index;
        self.selected = None;
    }

    pub fn index(&self) -> &ElectionIndex {
        &self.index
    }

    pub fn selected(&self) -> Option<&StateCode> {
        self.selected.as_ref()
    }

    /// Selects a state and returns the views to display for it.
    ///
    /// Returns None when the dataset has no row for this state. The state is
    /// still recorded as selected, and the caller is expected to show a
    /// placeholder instead of the charts.
    ///
    /// ```
    /// use election_map::{build_index, Round, SelectionState, StateCode, VoteRow};
    ///
    /// let rows = vec![
    ///     VoteRow::parse("SP", 1, "LULA", 100)?,
    ///     VoteRow::parse("SP", 2, "LULA", 120)?,
    /// ];
    /// let mut selection = SelectionState::new(build_index(&rows));
    /// let slice = selection.select(&StateCode::new("SP")?).unwrap();
    /// assert_eq!(slice.totals.round_2, 120);
    /// assert!(selection.select(&StateCode::new("ZZ")?).is_none());
    /// # Ok::<(), election_map::RowError>(())
    /// ```
    pub fn select(&mut self, state: &StateCode) -> Option<DetailSlice> {
        self.selected = Some(state.clone());
        let slice = detail_slice(&self.index, state, &self.references);
        if slice.is_none() {
            debug!("select: no data for state {}", state);
        }
        slice
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// Computes the detail views of a state without touching any selection.
pub fn detail_slice(
    index: &ElectionIndex,
    state: &StateCode,
    references: &[ReferenceCandidate],
) -> Option<DetailSlice> {
    let rounds = index.states.get(state)?;
    let region = region_of(state);

    let rankings = Round::ALL.map(|round| {
        rounds
            .get(&round)
            .map(|agg| ranking(&agg.rows))
            .unwrap_or_default()
    });

    let region_distributions = Round::ALL.map(|round| {
        region
            .and_then(|r| index.region(r, round))
            .map(|agg| region_distribution(&agg.candidate_totals))
            .unwrap_or_default()
    });

    let votes_of = |round: Round, marker: &str| -> u64 {
        rounds
            .get(&round)
            .and_then(|agg| {
                agg.rows
                    .iter()
                    .find(|r| r.candidate.to_uppercase().contains(marker))
            })
            .map(|r| r.votes)
            .unwrap_or(0)
    };
    let evolution = references
        .iter()
        .map(|rc| {
            let marker = rc.marker.to_uppercase();
            Evolution {
                label: rc.label.clone(),
                round_1: votes_of(Round::First, &marker),
                round_2: votes_of(Round::Second, &marker),
            }
        })
        .collect();

    let total_of = |round: Round| rounds.get(&round).map(|agg| agg.total_votes).unwrap_or(0);
    let totals = RoundTotals {
        round_1: total_of(Round::First),
        round_2: total_of(Round::Second),
    };

    Some(DetailSlice {
        state: state.clone(),
        region,
        rankings,
        region_distributions,
        evolution,
        totals,
    })
}

/// The top candidates of a bucket, by decreasing votes.
///
/// The sort is stable: equal counts keep the order of the rows.
pub fn ranking(rows: &[VoteRow]) -> Vec<CandidateVotes> {
    let mut sorted: Vec<&VoteRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.votes.cmp(&a.votes));
    sorted
        .into_iter()
        .take(RANKING_SIZE)
        .map(|r| CandidateVotes {
            candidate: r.candidate.clone(),
            votes: r.votes,
        })
        .collect()
}

/// The largest candidates of a region, followed by the sum of the others.
///
/// The grouped entry is only added when it holds at least one vote.
pub fn region_distribution(totals: &[(String, u64)]) -> Vec<CandidateVotes> {
    let mut sorted: Vec<&(String, u64)> = totals.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    let others: u64 = sorted.iter().skip(REGION_TOP).map(|(_, v)| *v).sum();
    let mut res: Vec<CandidateVotes> = sorted
        .iter()
        .take(REGION_TOP)
        .map(|(name, votes)| CandidateVotes {
            candidate: name.clone(),
            votes: *votes,
        })
        .collect();
    if others > 0 {
        res.push(CandidateVotes {
            candidate: OTHERS_LABEL.to_string(),
            votes: others,
        });
    }
    res
}
