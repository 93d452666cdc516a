mod aggregate;
mod charts;
mod data_structures;
mod error;
mod float_helper;
mod geo;
mod utility;

pub use data_structures::*;
pub use error::VizError;
pub use float_helper::*;
pub use geo::*;
pub use utility::*;

use log::{info, warn};

const DEFAULT_DATASET: &str = "./dataset/caso.csv";
const OUTPUT_DIR: &str = "./output";

/// How many states get their own pie slice before the rest collapses.
const PIE_TOP_STATES: usize = 10;
/// How many states the Gantt chart tracks.
const GANTT_TOP_STATES: usize = 10;
/// How many death series the line chart draws.
const LINE_TOP_STATES: usize = 5;
/// How many flows the chord summary prints.
const CHORD_TOP_FLOWS: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!(
        r#"
    INFORMATION VISUALIZATION
    Dataset: COVID-19 cases in Brazil, one row per state and date

    1 - Descriptive statistics (bar, pie)
    2 - Temporal information (Gantt, lines)
    3 - Geographic information (choropleth)
    4 - Hierarchical information (treemap, sunburst)
    5 - Networks and graphs (node-link, chord)
"#
    );

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATASET.to_string());
    info!("reading case dataset from {}", path);
    let records = load_cases(&path)?;
    info!("{} rows read", records.len());

    std::fs::create_dir_all(OUTPUT_DIR)?;

    descriptive_statistics(&records)?;
    temporal_information(&records)?;
    geographic_information(&records)?;
    hierarchical_information(&records)?;
    networks_and_graphs(&records)?;

    Ok(())
}

fn chart_path(name: &str) -> String {
    format!("{}/{}.png", OUTPUT_DIR, name)
}

fn descriptive_statistics(records: &[CaseRecord]) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Descriptive statistics");

    let totals = aggregate::cumulative_by_state(records);
    if totals.is_empty() {
        warn!("dataset is empty, skipping descriptive charts");
        return Ok(());
    }
    charts::bar_chart(&chart_path("bar"), &totals)?;

    let snapshot = aggregate::latest_snapshot(records);
    let (mut slices, others) = aggregate::pie_breakdown(&snapshot, PIE_TOP_STATES);
    slices.push(("Others".to_string(), others));
    charts::pie_chart(&chart_path("pie"), &slices)?;
    Ok(())
}

fn temporal_information(records: &[CaseRecord]) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Temporal information");

    let snapshot = aggregate::latest_snapshot(records);

    let top_confirmed = aggregate::top_states(&snapshot, GANTT_TOP_STATES, |t| t.confirmed);
    let spans: Vec<(String, chrono::NaiveDate, chrono::NaiveDate, u64)> = top_confirmed
        .iter()
        .filter_map(|state| {
            let series = aggregate::state_series(records, state, |r| r.confirmed);
            aggregate::series_span(&series)
                .map(|(start, end, total)| (state.clone(), start, end, total))
        })
        .collect();
    charts::gantt_chart(&chart_path("gantt"), &spans)?;

    let top_deaths = aggregate::top_states(&snapshot, LINE_TOP_STATES, |t| t.deaths);
    let series: Vec<(String, Vec<(chrono::NaiveDate, u64)>)> = top_deaths
        .iter()
        .map(|state| {
            (
                state.clone(),
                aggregate::state_series(records, state, |r| r.deaths),
            )
        })
        .collect();
    charts::line_chart(&chart_path("lines"), &series)?;
    Ok(())
}

fn geographic_information(records: &[CaseRecord]) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Geographic information");

    let snapshot = aggregate::latest_snapshot(records);
    // The boundary polygons come from an external GeoJSON collaborator; the
    // upper-cased value table is the only contract with it.
    let values = geo::choropleth_values(&snapshot);
    info!(
        "choropleth values ready for {} states, polygon drawing is left to the boundary dataset",
        values.len()
    );
    for (state, deaths) in values.iter().take(3) {
        println!("    {}: {} deaths", state, thousands(*deaths));
    }
    Ok(())
}

fn hierarchical_information(records: &[CaseRecord]) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Hierarchical information");

    let snapshot = aggregate::latest_snapshot(records);
    if snapshot.is_empty() {
        warn!("dataset is empty, skipping hierarchy");
        return Ok(());
    }
    // macro-region -> state -> deaths nesting, the treemap/sunburst input
    let groups = aggregate::deaths_by_macro_region(&snapshot)?;
    for group in &groups {
        println!(
            "    {:<12} {:>12} deaths across {} states",
            group.region,
            thousands(group.total_deaths),
            group.states.len()
        );
    }
    Ok(())
}

fn networks_and_graphs(records: &[CaseRecord]) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Networks and graphs");

    let snapshot = aggregate::latest_snapshot(records);
    if snapshot.is_empty() {
        warn!("dataset is empty, skipping graph charts");
        return Ok(());
    }

    let graph = StateGraph::from_snapshot(&snapshot)?;
    charts::node_link_chart(&chart_path("node_link"), &graph)?;

    // The chord/Sankey collaborator consumes the same deduplicated edge
    // list; print the heaviest flows as its summary.
    let mut flows: Vec<&StateEdge> = graph.edges().iter().collect();
    flows.sort_by(|x, y| {
        y.weight
            .partial_cmp(&x.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    info!(
        "{} states, {} undirected border flows",
        graph.len(),
        graph.edges().len()
    );
    for edge in flows.iter().take(CHORD_TOP_FLOWS) {
        println!(
            "    {} - {}: mean deaths {}",
            graph[edge.a].code,
            graph[edge.b].code,
            thousands(edge.weight.round() as u64)
        );
    }
    Ok(())
}
