use crate::config::{Region, StateCode};

/// The 27 federative units and the region each belongs to.
pub const STATE_REGIONS: [(&str, Region); 27] = [
    ("AC", Region::Norte),
    ("AP", Region::Norte),
    ("AM", Region::Norte),
    ("PA", Region::Norte),
    ("RO", Region::Norte),
    ("RR", Region::Norte),
    ("TO", Region::Norte),
    ("AL", Region::Nordeste),
    ("BA", Region::Nordeste),
    ("CE", Region::Nordeste),
    ("MA", Region::Nordeste),
    ("PB", Region::Nordeste),
    ("PE", Region::Nordeste),
    ("PI", Region::Nordeste),
    ("RN", Region::Nordeste),
    ("SE", Region::Nordeste),
    ("DF", Region::CentroOeste),
    ("GO", Region::CentroOeste),
    ("MT", Region::CentroOeste),
    ("MS", Region::CentroOeste),
    ("ES", Region::Sudeste),
    ("MG", Region::Sudeste),
    ("RJ", Region::Sudeste),
    ("SP", Region::Sudeste),
    ("PR", Region::Sul),
    ("RS", Region::Sul),
    ("SC", Region::Sul),
];

/// Returns the region of a state, or None if the code is not one of the 27 units.
pub fn region_of(state: &StateCode) -> Option<Region> {
    STATE_REGIONS
        .iter()
        .find(|(code, _)| *code == state.as_str())
        .map(|(_, region)| *region)
}

/// The known state codes, in alphabetical order.
pub fn known_states() -> Vec<StateCode> {
    let mut codes: Vec<StateCode> = STATE_REGIONS
        .iter()
        .filter_map(|(code, _)| StateCode::new(code).ok())
        .collect();
    codes.sort();
    codes
}
