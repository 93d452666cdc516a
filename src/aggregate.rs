//! Aggregations over the case records. Every function is a stateless
//! transformation of an immutable record slice; an empty dataset yields
//! empty aggregates rather than errors.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::data_structures::regions::{self, MacroRegion};
use crate::data_structures::{CaseRecord, CaseTotals};
use crate::error::VizError;

/// Latest date present in the dataset, `None` for an empty one.
pub fn latest_date(records: &[CaseRecord]) -> Option<NaiveDate> {
    records.iter().map(|r| r.date).max()
}

/// One entry per state: the maximum cumulative counts observed at dates up
/// to and including `target`. Taking the running max instead of the row dated
/// exactly at `target` tolerates missing, duplicated and out-of-order rows.
pub fn snapshot_at(records: &[CaseRecord], target: NaiveDate) -> BTreeMap<String, CaseTotals> {
    let mut snapshot: BTreeMap<String, CaseTotals> = BTreeMap::new();
    for record in records.iter().filter(|r| r.date <= target) {
        let entry = snapshot.entry(record.state.clone()).or_default();
        entry.confirmed = entry.confirmed.max(record.confirmed);
        entry.deaths = entry.deaths.max(record.deaths);
    }
    snapshot
}

/// Snapshot at the latest date of the dataset.
pub fn latest_snapshot(records: &[CaseRecord]) -> BTreeMap<String, CaseTotals> {
    match latest_date(records) {
        Some(date) => snapshot_at(records, date),
        None => BTreeMap::new(),
    }
}

/// Per-state cumulative totals over the whole series, sorted by confirmed
/// count, largest first. Feeds the bar chart.
pub fn cumulative_by_state(records: &[CaseRecord]) -> Vec<(String, CaseTotals)> {
    let mut totals: Vec<(String, CaseTotals)> = latest_snapshot(records).into_iter().collect();
    totals.sort_by(|a, b| b.1.confirmed.cmp(&a.1.confirmed));
    totals
}

/// Codes of the `n` top-ranked states by `key`, largest first.
pub fn top_states<F>(snapshot: &BTreeMap<String, CaseTotals>, n: usize, key: F) -> Vec<String>
where
    F: Fn(&CaseTotals) -> u64,
{
    let mut ranked: Vec<(&String, u64)> = snapshot
        .iter()
        .map(|(state, totals)| (state, key(totals)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(n)
        .map(|(state, _)| state.clone())
        .collect()
}

/// Cumulative series of one state: per-date maximum, ordered by date, then a
/// prefix max so the series never decreases.
pub fn state_series<F>(records: &[CaseRecord], state: &str, value: F) -> Vec<(NaiveDate, u64)>
where
    F: Fn(&CaseRecord) -> u64,
{
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.state == state) {
        let entry = by_date.entry(record.date).or_insert(0);
        *entry = (*entry).max(value(record));
    }

    let mut running = 0;
    by_date
        .into_iter()
        .map(|(date, value)| {
            running = running.max(value);
            (date, running)
        })
        .collect()
}

/// First date, last date and final value of a series. Feeds the Gantt bars.
pub fn series_span(series: &[(NaiveDate, u64)]) -> Option<(NaiveDate, NaiveDate, u64)> {
    let (first, _) = series.first()?;
    let (last, value) = series.last()?;
    Some((*first, *last, *value))
}

/// Top slices for the pie chart: the `n` largest states by confirmed count
/// plus the combined remainder.
pub fn pie_breakdown(
    snapshot: &BTreeMap<String, CaseTotals>,
    n: usize,
) -> (Vec<(String, u64)>, u64) {
    let mut ranked: Vec<(String, u64)> = snapshot
        .iter()
        .map(|(state, totals)| (state.clone(), totals.confirmed))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let others = ranked.iter().skip(n).map(|(_, value)| value).sum();
    ranked.truncate(n);
    (ranked, others)
}

/// Deaths nested as macro-region -> state, with per-region totals. Feeds the
/// treemap/sunburst collaborator.
#[derive(Debug)]
pub struct RegionGroup {
    pub region: MacroRegion,
    pub total_deaths: u64,
    pub states: Vec<(String, u64)>,
}

/// Groups the snapshot under the five macro-regions. A state with no entry
/// in the static grouping table rejects the whole aggregate.
pub fn deaths_by_macro_region(
    snapshot: &BTreeMap<String, CaseTotals>,
) -> Result<Vec<RegionGroup>, VizError> {
    let mut groups: BTreeMap<MacroRegion, RegionGroup> = BTreeMap::new();
    for (state, totals) in snapshot {
        let region = regions::macro_region_of(state)
            .ok_or_else(|| VizError::MissingRegionMapping(state.clone()))?;
        let group = groups.entry(region).or_insert_with(|| RegionGroup {
            region,
            total_deaths: 0,
            states: Vec::new(),
        });
        group.total_deaths += totals.deaths;
        group.states.push((state.clone(), totals.deaths));
    }
    Ok(groups.into_iter().map(|(_, group)| group).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, state: &str, confirmed: u64, deaths: u64) -> CaseRecord {
        CaseRecord {
            date: date.parse().unwrap(),
            state: state.to_string(),
            confirmed,
            deaths,
        }
    }

    #[test]
    fn snapshot_takes_the_running_max_up_to_the_target() {
        // decreasing anomaly: the later row reports fewer confirmed cases
        let records = vec![rec("2021-01-01", "R1", 5, 0), rec("2021-01-03", "R1", 3, 0)];
        let target = latest_date(&records).unwrap();
        let snapshot = snapshot_at(&records, target);
        assert_eq!(snapshot["R1"].confirmed, 5);
    }

    #[test]
    fn snapshot_ignores_rows_after_the_target() {
        let records = vec![rec("2021-01-01", "R1", 5, 1), rec("2021-01-03", "R1", 9, 2)];
        let snapshot = snapshot_at(&records, "2021-01-02".parse().unwrap());
        assert_eq!(snapshot["R1"], CaseTotals { confirmed: 5, deaths: 1 });
    }

    #[test]
    fn snapshot_selection_is_idempotent() {
        let records = vec![
            rec("2021-01-01", "SP", 10, 1),
            rec("2021-01-02", "SP", 20, 2),
            rec("2021-01-02", "RJ", 7, 1),
            rec("2021-01-01", "RJ", 9, 3),
        ];
        assert_eq!(latest_snapshot(&records), latest_snapshot(&records));
    }

    #[test]
    fn snapshot_keeps_states_that_stopped_reporting() {
        let records = vec![rec("2021-01-01", "AC", 4, 0), rec("2021-01-05", "SP", 50, 5)];
        let snapshot = latest_snapshot(&records);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["AC"].confirmed, 4);
    }

    #[test]
    fn empty_dataset_yields_empty_aggregates() {
        assert!(latest_date(&[]).is_none());
        assert!(latest_snapshot(&[]).is_empty());
        assert!(cumulative_by_state(&[]).is_empty());
    }

    #[test]
    fn cumulative_totals_are_sorted_by_confirmed() {
        let records = vec![
            rec("2021-01-01", "RJ", 7, 1),
            rec("2021-01-01", "SP", 50, 5),
            rec("2021-01-01", "AC", 4, 0),
        ];
        let totals = cumulative_by_state(&records);
        let order: Vec<&str> = totals.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(order, vec!["SP", "RJ", "AC"]);
    }

    #[test]
    fn top_states_ranks_by_the_given_key() {
        let records = vec![
            rec("2021-01-01", "SP", 50, 1),
            rec("2021-01-01", "RJ", 7, 9),
            rec("2021-01-01", "AC", 4, 5),
        ];
        let snapshot = latest_snapshot(&records);
        assert_eq!(
            top_states(&snapshot, 2, |t| t.deaths),
            vec!["RJ".to_string(), "AC".to_string()]
        );
        assert_eq!(top_states(&snapshot, 1, |t| t.confirmed), vec!["SP".to_string()]);
    }

    #[test]
    fn state_series_is_non_decreasing() {
        let records = vec![
            rec("2021-01-01", "SP", 0, 5),
            rec("2021-01-02", "SP", 0, 3),
            rec("2021-01-02", "SP", 0, 4),
            rec("2021-01-03", "RJ", 0, 99),
        ];
        let series = state_series(&records, "SP", |r| r.deaths);
        assert_eq!(
            series,
            vec![
                ("2021-01-01".parse().unwrap(), 5),
                ("2021-01-02".parse().unwrap(), 5),
            ]
        );
    }

    #[test]
    fn series_span_reports_first_last_and_final_value() {
        let series = vec![
            ("2021-01-01".parse().unwrap(), 5),
            ("2021-02-01".parse().unwrap(), 8),
        ];
        assert_eq!(
            series_span(&series),
            Some(("2021-01-01".parse().unwrap(), "2021-02-01".parse().unwrap(), 8))
        );
        assert_eq!(series_span(&[]), None);
    }

    #[test]
    fn pie_breakdown_splits_top_states_and_remainder() {
        let records = vec![
            rec("2021-01-01", "SP", 50, 0),
            rec("2021-01-01", "RJ", 30, 0),
            rec("2021-01-01", "AC", 4, 0),
            rec("2021-01-01", "SE", 6, 0),
        ];
        let snapshot = latest_snapshot(&records);
        let (top, others) = pie_breakdown(&snapshot, 2);
        assert_eq!(top, vec![("SP".to_string(), 50), ("RJ".to_string(), 30)]);
        assert_eq!(others, 10);
    }

    #[test]
    fn macro_region_grouping_nests_states_and_sums_totals() {
        let records = vec![
            rec("2021-01-01", "SP", 0, 100),
            rec("2021-01-01", "RJ", 0, 50),
            rec("2021-01-01", "RS", 0, 30),
        ];
        let snapshot = latest_snapshot(&records);
        let groups = deaths_by_macro_region(&snapshot).unwrap();
        assert_eq!(groups.len(), 2);

        let southeast = groups
            .iter()
            .find(|g| g.region == MacroRegion::Southeast)
            .unwrap();
        assert_eq!(southeast.total_deaths, 150);
        assert_eq!(southeast.states.len(), 2);

        let south = groups.iter().find(|g| g.region == MacroRegion::South).unwrap();
        assert_eq!(south.total_deaths, 30);
    }

    #[test]
    fn macro_region_grouping_rejects_unmapped_states() {
        let records = vec![rec("2021-01-01", "ZZ", 0, 1)];
        let snapshot = latest_snapshot(&records);
        let err = deaths_by_macro_region(&snapshot).unwrap_err();
        assert!(matches!(err, VizError::MissingRegionMapping(code) if code == "ZZ"));
    }
}
