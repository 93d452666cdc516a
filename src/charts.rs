//! Thin rendering layer over `plotters`. Each function takes an already
//! computed aggregate and writes one PNG; nothing here aggregates data.

use std::error::Error;

use chrono::{Datelike, NaiveDate};
use log::warn;
use plotters::element::Pie;
use plotters::prelude::*;

use crate::data_structures::graph::{marker_size, StateGraph};
use crate::data_structures::CaseTotals;
use crate::float_helper::NonNanF64;
use crate::predefined_color;
use crate::utility::thousands;

predefined_color!(STEELBLUE, 70, 130, 180, "Fill of the confirmed-cases bars");
predefined_color!(SALMON, 250, 128, 114, "Fill of the death bars");
predefined_color!(SLATE_GREY, 153, 153, 153, "Fill of the remainder pie slice");
predefined_color!(EDGE_GREY, 136, 136, 136, "Stroke of graph edges");

const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

fn day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

fn format_day(day: i64) -> String {
    NaiveDate::from_num_days_from_ce_opt(day as i32)
        .map(|date| date.format("%Y-%m").to_string())
        .unwrap_or_default()
}

/// Grouped bars: cumulative confirmed cases and deaths per state, in the
/// order the caller ranked them.
pub fn bar_chart(path: &str, totals: &[(String, CaseTotals)]) -> Result<(), Box<dyn Error>> {
    if totals.is_empty() {
        warn!("no per-state totals, skipping bar chart");
        return Ok(());
    }

    let root = BitMapBackend::new(path, (1680, 720)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(20, 20, 20, 20);

    let max_value = totals
        .iter()
        .map(|(_, t)| t.confirmed.max(t.deaths))
        .max()
        .unwrap_or(0)
        .max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Cumulative confirmed cases and deaths by state",
            ("sans-serif", 30).into_font(),
        )
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5f64..totals.len() as f64 - 0.5, 0f64..max_value as f64 * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(totals.len())
        .x_label_formatter(&|x| {
            let nearest = x.round();
            if (x - nearest).abs() > 0.25 || nearest < 0.0 {
                return String::new();
            }
            totals
                .get(nearest as usize)
                .map(|(state, _)| state.clone())
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| thousands(*y as u64))
        .y_desc("Total")
        .x_desc("State")
        .draw()?;

    chart
        .draw_series(totals.iter().enumerate().map(|(i, (_, t))| {
            Rectangle::new(
                [(i as f64 - 0.4, 0.0), (i as f64, t.confirmed as f64)],
                STEELBLUE.filled(),
            )
        }))?
        .label("Confirmed cases")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], STEELBLUE.filled()));

    chart
        .draw_series(totals.iter().enumerate().map(|(i, (_, t))| {
            Rectangle::new(
                [(i as f64, 0.0), (i as f64 + 0.4, t.deaths as f64)],
                SALMON.filled(),
            )
        }))?
        .label("Deaths")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], SALMON.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Pie of the top confirmed-case states; the last slice is the aggregated
/// remainder and is drawn grey.
pub fn pie_chart(path: &str, slices: &[(String, u64)]) -> Result<(), Box<dyn Error>> {
    let total: u64 = slices.iter().map(|(_, value)| value).sum();
    if total == 0 {
        warn!("no confirmed cases to slice, skipping pie chart");
        return Ok(());
    }

    let root = BitMapBackend::new(path, (900, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Top states by confirmed cases vs. the rest of Brazil",
        ("sans-serif", 28).into_font(),
    )?;

    let sizes: Vec<f64> = slices.iter().map(|(_, value)| *value as f64).collect();
    let labels: Vec<String> = slices.iter().map(|(state, _)| state.clone()).collect();
    let colors: Vec<RGBColor> = (0..slices.len())
        .map(|i| {
            if i + 1 == slices.len() {
                SLATE_GREY
            } else {
                SERIES_COLORS[i % SERIES_COLORS.len()]
            }
        })
        .collect();

    let (width, height) = root.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(140.0);
    pie.label_style(("sans-serif", 18).into_font());
    pie.percentages(("sans-serif", 14).into_font());
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}

/// One horizontal bar per state spanning its first to last reported date,
/// annotated with the final cumulative count.
pub fn gantt_chart(
    path: &str,
    spans: &[(String, NaiveDate, NaiveDate, u64)],
) -> Result<(), Box<dyn Error>> {
    if spans.is_empty() {
        warn!("no reporting spans, skipping Gantt chart");
        return Ok(());
    }

    let start = spans
        .iter()
        .map(|(_, start, _, _)| day_number(*start))
        .min()
        .unwrap_or(0);
    let end = spans
        .iter()
        .map(|(_, _, end, _)| day_number(*end))
        .max()
        .unwrap_or(start + 1);
    // room on the right for the count labels
    let pad = ((end - start) / 8).max(30);

    let root = BitMapBackend::new(path, (1400, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(20, 20, 20, 20);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Confirmed-case reporting span per state (Gantt)",
            ("sans-serif", 30).into_font(),
        )
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(start..end + pad, -0.5f64..spans.len() as f64 - 0.5)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_labels(8)
        .x_label_formatter(&|day| format_day(*day))
        .y_labels(spans.len())
        .y_label_formatter(&|y| {
            let nearest = y.round();
            if (y - nearest).abs() > 0.25 || nearest < 0.0 {
                return String::new();
            }
            spans
                .get(nearest as usize)
                .map(|(state, ..)| state.clone())
                .unwrap_or_default()
        })
        .x_desc("Date")
        .draw()?;

    for (i, (_, start, end, total)) in spans.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (day_number(*start), i as f64 - 0.4),
                (day_number(*end), i as f64 + 0.4),
            ],
            color.mix(0.8).filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            thousands(*total),
            (day_number(*end) + 10, i as f64 - 0.15),
            ("sans-serif", 14).into_font(),
        )))?;
    }

    root.present()?;
    Ok(())
}

/// Death series over time, one line per state.
pub fn line_chart(
    path: &str,
    series: &[(String, Vec<(NaiveDate, u64)>)],
) -> Result<(), Box<dyn Error>> {
    let mut x_min = i64::MAX;
    let mut x_max = i64::MIN;
    let mut y_max = 0u64;
    for (_, points) in series {
        for (date, value) in points {
            let day = day_number(*date);
            x_min = x_min.min(day);
            x_max = x_max.max(day);
            y_max = y_max.max(*value);
        }
    }
    if x_min > x_max {
        warn!("no series points, skipping line chart");
        return Ok(());
    }

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(20, 20, 20, 20);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Deaths over time in the most affected states",
            ("sans-serif", 30).into_font(),
        )
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max + 1, 0f64..(y_max as f64 * 1.1).max(1.0))?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|day| format_day(*day))
        .y_label_formatter(&|y| thousands(*y as u64))
        .x_desc("Date")
        .y_desc("Deaths")
        .draw()?;

    for (idx, (state, points)) in series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|(date, value)| (day_number(*date), *value as f64)),
                color.stroke_width(2),
            ))?
            .label(state.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn heat_color(deaths: u64, max_deaths: u64) -> RGBColor {
    let intensity = deaths as f64 / max_deaths.max(1) as f64;
    let fade = (200.0 * (1.0 - intensity)) as u8;
    RGBColor(220, fade, fade)
}

/// Node-link rendering of the adjacency graph: nodes on a circle, marker
/// size and color driven by the death count, edge width by the flow weight.
pub fn node_link_chart(path: &str, graph: &StateGraph) -> Result<(), Box<dyn Error>> {
    if graph.is_empty() {
        warn!("graph is empty, skipping node-link chart");
        return Ok(());
    }

    let root = BitMapBackend::new(path, (1200, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(20, 20, 20, 20);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "COVID-19 deaths by state (node-link graph)",
            ("sans-serif", 30).into_font(),
        )
        .build_cartesian_2d(-1.4f64..1.4f64, -1.4f64..1.4f64)?;

    // circular layout, nodes in code order
    let count = graph.len();
    let positions: Vec<(f64, f64)> = (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / count as f64;
            (angle.cos(), angle.sin())
        })
        .collect();

    let max_weight = graph
        .edges()
        .iter()
        .filter_map(|edge| NonNanF64::new(edge.weight))
        .max()
        .map(|w| w.0)
        .unwrap_or(1.0)
        .max(1.0);

    for edge in graph.edges() {
        let width = 1 + (edge.weight / max_weight * 4.0) as u32;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![positions[edge.a], positions[edge.b]],
            EDGE_GREY.stroke_width(width),
        )))?;
    }

    let max_deaths = graph.nodes().iter().map(|node| node.deaths).max().unwrap_or(0);
    for (node, position) in graph.nodes().iter().zip(&positions) {
        let radius = (marker_size(node.deaths) / 2.0).round() as i32;
        chart.draw_series(std::iter::once(Circle::new(
            *position,
            radius,
            heat_color(node.deaths, max_deaths).filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{} ({})", node.code, thousands(node.deaths)),
            (position.0, position.1 - 0.06),
            ("sans-serif", 15).into_font(),
        )))?;
    }

    root.present()?;
    Ok(())
}
