use std::fmt;

/// Amount of first-level divisions: 26 states plus the Federal District.
pub const STATE_COUNT: usize = 27;

/// One of the five fixed macro-regions of Brazil, used to nest states for the
/// hierarchical (treemap/sunburst) aggregates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MacroRegion {
    North,
    Northeast,
    CentralWest,
    Southeast,
    South,
}

impl MacroRegion {
    pub fn name(self) -> &'static str {
        match self {
            MacroRegion::North => "North",
            MacroRegion::Northeast => "Northeast",
            MacroRegion::CentralWest => "Central-West",
            MacroRegion::Southeast => "Southeast",
            MacroRegion::South => "South",
        }
    }
}

impl fmt::Display for MacroRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Which states share a land border. Both directions are listed; the graph
/// code collapses them to one undirected edge per pair. This table is fixed
/// and never changes at runtime.
pub const NEIGHBOURS: [(&str, &[&str]); STATE_COUNT] = [
    ("AC", &["RO", "AM"]),
    ("AL", &["SE", "BA", "PE"]),
    ("AP", &["PA"]),
    ("AM", &["RR", "PA", "MT", "RO", "AC"]),
    ("BA", &["SE", "AL", "PE", "PI", "GO", "MG", "ES"]),
    ("CE", &["RN", "PB", "PE", "PI"]),
    ("DF", &["GO", "MG"]),
    ("ES", &["BA", "MG", "RJ"]),
    ("GO", &["TO", "MG", "BA", "DF", "MT", "MS"]),
    ("MA", &["PI", "TO", "PA"]),
    ("MT", &["PA", "RO", "AM", "GO", "MS"]),
    ("MS", &["MT", "GO", "SP", "PR"]),
    ("MG", &["BA", "ES", "RJ", "SP", "DF", "GO"]),
    ("PA", &["RR", "AP", "MA", "TO", "MT", "AM"]),
    ("PB", &["RN", "CE", "PE"]),
    ("PR", &["SC", "SP", "MS"]),
    ("PE", &["PB", "CE", "BA", "AL"]),
    ("PI", &["MA", "CE", "BA"]),
    ("RJ", &["ES", "MG", "SP"]),
    ("RN", &["CE", "PB"]),
    ("RS", &["SC"]),
    ("RO", &["AC", "MT", "AM"]),
    ("RR", &["AM", "PA"]),
    ("SC", &["PR", "RS"]),
    ("SP", &["MG", "RJ", "PR", "MS"]),
    ("SE", &["AL", "BA"]),
    ("TO", &["MA", "PA", "GO"]),
];

/// Macro-region of every state. Fixed, exhaustive over the 27 codes.
pub const MACRO_REGIONS: [(&str, MacroRegion); STATE_COUNT] = [
    ("AC", MacroRegion::North),
    ("AL", MacroRegion::Northeast),
    ("AP", MacroRegion::North),
    ("AM", MacroRegion::North),
    ("BA", MacroRegion::Northeast),
    ("CE", MacroRegion::Northeast),
    ("DF", MacroRegion::CentralWest),
    ("ES", MacroRegion::Southeast),
    ("GO", MacroRegion::CentralWest),
    ("MA", MacroRegion::Northeast),
    ("MT", MacroRegion::CentralWest),
    ("MS", MacroRegion::CentralWest),
    ("MG", MacroRegion::Southeast),
    ("PA", MacroRegion::North),
    ("PB", MacroRegion::Northeast),
    ("PR", MacroRegion::South),
    ("PE", MacroRegion::Northeast),
    ("PI", MacroRegion::Northeast),
    ("RJ", MacroRegion::Southeast),
    ("RN", MacroRegion::Northeast),
    ("RS", MacroRegion::South),
    ("RO", MacroRegion::North),
    ("RR", MacroRegion::North),
    ("SC", MacroRegion::South),
    ("SP", MacroRegion::Southeast),
    ("SE", MacroRegion::Northeast),
    ("TO", MacroRegion::North),
];

/// Neighbour list of a state, `None` when the code is not in the table.
pub fn neighbours_of(state: &str) -> Option<&'static [&'static str]> {
    NEIGHBOURS
        .iter()
        .find(|(code, _)| *code == state)
        .map(|(_, listed)| *listed)
}

/// Macro-region of a state, `None` when the code is not in the table.
pub fn macro_region_of(state: &str) -> Option<MacroRegion> {
    MACRO_REGIONS
        .iter()
        .find(|(code, _)| *code == state)
        .map(|(_, region)| *region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn grouper_is_total_over_all_states() {
        assert_eq!(MACRO_REGIONS.len(), STATE_COUNT);
        let mut seen: BTreeMap<&str, MacroRegion> = BTreeMap::new();
        for (code, region) in MACRO_REGIONS.iter() {
            // no code maps twice
            assert!(seen.insert(*code, *region).is_none(), "{} listed twice", code);
        }
        assert_eq!(seen.len(), STATE_COUNT);

        let groups: BTreeSet<MacroRegion> = seen.values().copied().collect();
        assert_eq!(groups.len(), 5);
    }

    #[test]
    fn neighbour_table_covers_the_same_states_as_the_grouper() {
        let adjacency: BTreeSet<&str> = NEIGHBOURS.iter().map(|(code, _)| *code).collect();
        let grouped: BTreeSet<&str> = MACRO_REGIONS.iter().map(|(code, _)| *code).collect();
        assert_eq!(adjacency, grouped);
        assert_eq!(adjacency.len(), STATE_COUNT);
    }

    #[test]
    fn neighbour_table_is_symmetric() {
        for (code, listed) in NEIGHBOURS.iter() {
            for other in listed.iter() {
                assert_ne!(code, other, "{} lists itself", code);
                let back = neighbours_of(other).unwrap_or(&[]);
                assert!(
                    back.contains(code),
                    "{} lists {} but not the reverse",
                    code,
                    other
                );
            }
        }
    }

    #[test]
    fn lookups_reject_unknown_codes() {
        assert!(neighbours_of("XX").is_none());
        assert!(macro_region_of("XX").is_none());
        assert_eq!(macro_region_of("DF"), Some(MacroRegion::CentralWest));
        assert_eq!(neighbours_of("RS"), Some(&["SC"][..]));
    }
}
