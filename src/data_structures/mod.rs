pub(crate) mod graph;
pub(crate) mod regions;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use graph::{marker_size, StateEdge, StateGraph, StateNode, MARKER_FLOOR, MARKER_SCALE};
pub use regions::{macro_region_of, neighbours_of, MacroRegion, STATE_COUNT};

/*
date,state,confirmed,deaths
2020-06-19,SP,221973,12494
*/
/// One observation of the cumulative case series: a state at a date with the
/// confirmed and death counts reported so far. Dates are not guaranteed to be
/// sorted or deduplicated in the input.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CaseRecord {
    pub date: NaiveDate,
    pub state: String,
    pub confirmed: u64,
    pub deaths: u64,
}

/// Cumulative totals of one state at a snapshot instant.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct CaseTotals {
    pub confirmed: u64,
    pub deaths: u64,
}
