//! Alignment of the snapshot with the external boundary dataset.
//!
//! The boundary collection (a GeoJSON feature collection whose features carry
//! a `sigla` state code) is fetched by an external collaborator; only its
//! keys matter here. Malformed input propagates to the caller, the
//! graph/adjacency logic is unaffected by it.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::data_structures::CaseTotals;
use crate::error::VizError;

#[derive(Deserialize, Debug)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize, Debug)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Deserialize, Debug)]
struct FeatureProperties {
    sigla: String,
}

/// Upper-cased state code of every feature in the boundary collection, in
/// feature order.
pub fn boundary_codes(geojson: &str) -> Result<Vec<String>, VizError> {
    let collection: FeatureCollection = serde_json::from_str(geojson)?;
    Ok(collection
        .features
        .into_iter()
        .map(|feature| feature.properties.sigla.to_uppercase())
        .collect())
}

/// Upper-cased per-state death totals, the value side of the choropleth
/// contract, sorted largest first.
pub fn choropleth_values(snapshot: &BTreeMap<String, CaseTotals>) -> Vec<(String, u64)> {
    let mut values: Vec<(String, u64)> = snapshot
        .iter()
        .map(|(state, totals)| (state.to_uppercase(), totals.deaths))
        .collect();
    values.sort_by(|a, b| b.1.cmp(&a.1));
    values
}

/// Death totals re-indexed over the boundary codes: one entry per boundary
/// feature, 0 for states the snapshot does not cover. Snapshot keys are
/// case-normalized so they match the boundary keys.
pub fn align_to_boundaries(
    snapshot: &BTreeMap<String, CaseTotals>,
    codes: &[String],
) -> Vec<(String, u64)> {
    let by_code: BTreeMap<String, u64> = snapshot
        .iter()
        .map(|(state, totals)| (state.to_uppercase(), totals.deaths))
        .collect();
    codes
        .iter()
        .map(|code| (code.clone(), by_code.get(code).copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"sigla": "sp", "name": "São Paulo"}, "geometry": null},
            {"type": "Feature", "properties": {"sigla": "RJ", "name": "Rio de Janeiro"}, "geometry": null},
            {"type": "Feature", "properties": {"sigla": "AC", "name": "Acre"}, "geometry": null}
        ]
    }"#;

    fn snapshot() -> BTreeMap<String, CaseTotals> {
        vec![
            ("sp".to_string(), CaseTotals { confirmed: 0, deaths: 100 }),
            ("RJ".to_string(), CaseTotals { confirmed: 0, deaths: 50 }),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn codes_are_case_normalized() {
        let codes = boundary_codes(BOUNDARIES).unwrap();
        assert_eq!(codes, vec!["SP", "RJ", "AC"]);
    }

    #[test]
    fn alignment_covers_every_boundary_with_zero_fill() {
        let codes = boundary_codes(BOUNDARIES).unwrap();
        let aligned = align_to_boundaries(&snapshot(), &codes);
        assert_eq!(
            aligned,
            vec![
                ("SP".to_string(), 100),
                ("RJ".to_string(), 50),
                ("AC".to_string(), 0),
            ]
        );
    }

    #[test]
    fn malformed_boundary_data_propagates() {
        let err = boundary_codes("{\"features\": 12}").unwrap_err();
        assert!(matches!(err, VizError::BoundaryData(_)));
    }
}
