/*!
Aggregation of two-round presidential election results by state and by region.

The input is a flat table of vote rows (state, round, candidate, votes), as
produced after grouping the raw vote files. From it, [`build_index`] derives:
- for each state and round: the leading candidate, the total and the rows
  in source order;
- for each region and round: the total of each candidate over the states of
  that region.

A [`SelectionState`] holds the loaded index and the state picked by the user.
Selecting a state produces a [`DetailSlice`] with the ranking, the regional
distribution, the evolution between rounds and the totals of that state.

See the [manual] for the input formats of the `geovotes` program.
*/

mod config;
mod regions;

pub mod builder;
pub mod classify;
pub mod manual;
pub mod selection;

pub use crate::builder::{build_index, ElectionIndex};
pub use crate::classify::{candidate_color, classify, CandidateCategory, NO_DATA_COLOR};
pub use crate::config::*;
pub use crate::regions::{known_states, region_of, STATE_REGIONS};
pub use crate::selection::{detail_slice, SelectionState, OTHERS_LABEL};
