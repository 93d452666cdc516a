use thiserror::Error;

/// Errors surfaced by the aggregation core.
///
/// An empty dataset is deliberately not represented here: it produces empty
/// aggregates, which downstream rendering shows as "no data".
#[derive(Debug, Error)]
pub enum VizError {
    /// A state code occurs in the dataset but has no entry in the static
    /// adjacency/macro-region tables. The tables are assumed exhaustive, so
    /// the affected computation aborts instead of silently dropping the state.
    #[error("state '{0}' is missing from the static region tables")]
    MissingRegionMapping(String),

    #[error("could not read the case dataset: {0}")]
    Dataset(#[from] csv::Error),

    /// The externally supplied boundary collection could not be decoded.
    #[error("boundary dataset is malformed: {0}")]
    BoundaryData(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
