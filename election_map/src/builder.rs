pub use crate::config::*;
use crate::regions::region_of;

use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// The two indexes derived from one loaded dataset.
///
/// Absent `(state, round)` or `(region, round)` pairs are missing keys, never
/// zero-valued entries.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ElectionIndex {
    pub states: BTreeMap<StateCode, BTreeMap<Round, StateAggregate>>,
    pub regions: BTreeMap<Region, BTreeMap<Round, RegionAggregate>>,
    /// States seen in the rows that have no region. Their votes are only
    /// counted in `states`.
    pub unmapped_states: BTreeSet<StateCode>,
}

impl ElectionIndex {
    pub fn state(&self, state: &StateCode, round: Round) -> Option<&StateAggregate> {
        self.states.get(state).and_then(|rounds| rounds.get(&round))
    }

    pub fn region(&self, region: Region, round: Round) -> Option<&RegionAggregate> {
        self.regions.get(&region).and_then(|rounds| rounds.get(&round))
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn total_votes(&self) -> u64 {
        self.states
            .values()
            .flat_map(|rounds| rounds.values())
            .map(|agg| agg.total_votes)
            .sum()
    }
}

/// A builder for the aggregate indexes.
///
/// Rows can be fed one at a time, which is useful when they are streamed
/// from a reader. For a slice of rows, [`build_index`] is simpler.
///
/// ```
/// use election_map::builder::Builder;
/// use election_map::{Round, StateCode, VoteRow};
///
/// let mut builder = Builder::new();
/// builder.add_row(&VoteRow::parse("SP", 1, "LULA", 100)?);
/// builder.add_row(&VoteRow::parse("SP", 1, "BOLSONARO", 80)?);
/// let index = builder.build();
///
/// let sp = index.state(&StateCode::new("SP")?, Round::First).unwrap();
/// assert_eq!(sp.leading_candidate, "LULA");
/// assert_eq!(sp.total_votes, 180);
/// # Ok::<(), election_map::RowError>(())
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    index: ElectionIndex,
    // Position of a candidate in the totals of its region and round.
    region_positions: HashMap<(Region, Round, String), usize>,
    num_rows: usize,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn add_row(&mut self, row: &VoteRow) {
        self.num_rows += 1;
        let agg = self
            .index
            .states
            .entry(row.state.clone())
            .or_default()
            .entry(row.round)
            .or_insert_with(StateAggregate::empty);
        agg.total_votes += row.votes;
        // Strict comparison: on a tie, the first candidate seen stays ahead.
        if row.votes > agg.leading_votes {
            agg.leading_votes = row.votes;
            agg.leading_candidate = row.candidate.clone();
        }
        agg.rows.push(row.clone());

        match region_of(&row.state) {
            Some(region) => {
                let totals = self
                    .index
                    .regions
                    .entry(region)
                    .or_default()
                    .entry(row.round)
                    .or_default();
                let key = (region, row.round, row.candidate.clone());
                match self.region_positions.get(&key) {
                    Some(pos) => {
                        totals.candidate_totals[*pos].1 += row.votes;
                    }
                    None => {
                        self.region_positions
                            .insert(key, totals.candidate_totals.len());
                        totals
                            .candidate_totals
                            .push((row.candidate.clone(), row.votes));
                    }
                }
            }
            None => {
                if self.index.unmapped_states.insert(row.state.clone()) {
                    warn!(
                        "State {} has no region: its votes are excluded from the region totals",
                        row.state
                    );
                }
            }
        }
    }

    pub fn add_rows(&mut self, rows: &[VoteRow]) {
        for row in rows {
            self.add_row(row);
        }
    }

    pub fn build(self) -> ElectionIndex {
        debug!(
            "build: {} rows, {} states, {} regions",
            self.num_rows,
            self.index.states.len(),
            self.index.regions.len()
        );
        self.index
    }
}

/// Builds the state and region indexes from a sequence of rows.
///
/// An empty sequence produces empty indexes.
pub fn build_index(rows: &[VoteRow]) -> ElectionIndex {
    info!("Aggregating {} vote rows", rows.len());
    let mut builder = Builder::new();
    builder.add_rows(rows);
    let index = builder.build();
    for (state, rounds) in index.states.iter() {
        for (round, agg) in rounds.iter() {
            debug!(
                "{} round {}: {} leads with {} of {} votes",
                state, round, agg.leading_candidate, agg.leading_votes, agg.total_votes
            );
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str, round: i64, candidate: &str, votes: i64) -> VoteRow {
        VoteRow::parse(state, round, candidate, votes).unwrap()
    }

    fn sc(s: &str) -> StateCode {
        StateCode::new(s).unwrap()
    }

    fn sample_rows() -> Vec<VoteRow> {
        vec![
            row("SP", 1, "LULA", 100),
            row("SP", 1, "BOLSONARO", 80),
            row("SP", 2, "LULA", 120),
            row("SP", 2, "BOLSONARO", 110),
            row("RJ", 1, "BOLSONARO", 70),
            row("RJ", 1, "LULA", 60),
            row("RJ", 1, "CIRO GOMES", 10),
            row("BA", 1, "LULA", 300),
            row("BA", 1, "BOLSONARO", 90),
        ]
    }

    #[test]
    fn sao_paulo_scenario() {
        let _ = env_logger::try_init();
        let index = build_index(&sample_rows()[..4]);
        let first = index.state(&sc("SP"), Round::First).unwrap();
        assert_eq!(first.leading_candidate, "LULA");
        assert_eq!(first.leading_votes, 100);
        assert_eq!(first.total_votes, 180);
        let second = index.state(&sc("SP"), Round::Second).unwrap();
        assert_eq!(second.leading_candidate, "LULA");
        assert_eq!(second.leading_votes, 120);
        assert_eq!(second.total_votes, 230);
        assert_eq!(second.rows.len(), 2);
    }

    #[test]
    fn totals_are_conserved() {
        let rows = sample_rows();
        let index = build_index(&rows);
        let expected: u64 = rows.iter().map(|r| r.votes).sum();
        assert_eq!(index.total_votes(), expected);
        for rounds in index.states.values() {
            for agg in rounds.values() {
                let max = agg.rows.iter().map(|r| r.votes).max().unwrap();
                assert_eq!(agg.leading_votes, max);
                let sum: u64 = agg.rows.iter().map(|r| r.votes).sum();
                assert_eq!(agg.total_votes, sum);
            }
        }
    }

    #[test]
    fn region_totals_match_state_totals() {
        let index = build_index(&sample_rows());
        for (region, rounds) in index.regions.iter() {
            for (round, agg) in rounds.iter() {
                let states_sum: u64 = index
                    .states
                    .iter()
                    .filter(|(s, _)| region_of(s) == Some(*region))
                    .filter_map(|(_, r)| r.get(round))
                    .map(|a| a.total_votes)
                    .sum();
                assert_eq!(agg.total_votes(), states_sum);
            }
        }
        let sudeste = index.region(Region::Sudeste, Round::First).unwrap();
        assert_eq!(sudeste.votes_for("LULA"), Some(160));
        assert_eq!(sudeste.votes_for("BOLSONARO"), Some(150));
        assert_eq!(sudeste.votes_for("CIRO GOMES"), Some(10));
        // First seen order is kept.
        assert_eq!(sudeste.candidate_totals[0].0, "LULA");
        assert!(index.region(Region::Sul, Round::First).is_none());
        assert!(index.region(Region::Nordeste, Round::Second).is_none());
    }

    #[test]
    fn ties_keep_first_leader() {
        let index = build_index(&[
            row("MG", 1, "TEBET", 50),
            row("MG", 1, "LULA", 50),
            row("MG", 1, "CIRO", 20),
        ]);
        let agg = index.state(&sc("MG"), Round::First).unwrap();
        assert_eq!(agg.leading_candidate, "TEBET");
        assert_eq!(agg.leading_votes, 50);
    }

    #[test]
    fn zero_votes_keep_placeholder_leader() {
        let index = build_index(&[row("AC", 2, "LULA", 0)]);
        let agg = index.state(&sc("AC"), Round::Second).unwrap();
        assert_eq!(agg.leading_candidate, NO_LEADER);
        assert_eq!(agg.total_votes, 0);
        assert_eq!(agg.rows.len(), 1);
    }

    #[test]
    fn unmapped_state_is_excluded_from_regions() {
        let index = build_index(&[row("ZZ", 1, "LULA", 10), row("SP", 1, "LULA", 5)]);
        assert_eq!(index.state(&sc("ZZ"), Round::First).unwrap().total_votes, 10);
        assert!(index.unmapped_states.contains(&sc("ZZ")));
        assert_eq!(index.unmapped_states.len(), 1);
        let sudeste = index.region(Region::Sudeste, Round::First).unwrap();
        assert_eq!(sudeste.total_votes(), 5);
        assert_eq!(index.regions.len(), 1);
    }

    #[test]
    fn empty_input() {
        let index = build_index(&[]);
        assert!(index.is_empty());
        assert!(index.regions.is_empty());
        assert_eq!(index.total_votes(), 0);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let rows = sample_rows();
        assert_eq!(build_index(&rows), build_index(&rows));
    }

    #[test]
    fn incremental_matches_batch() {
        let rows = sample_rows();
        let mut builder = Builder::new();
        for r in rows.iter() {
            builder.add_row(r);
        }
        assert_eq!(builder.build(), build_index(&rows));
    }
}
