use dioxus::prelude::*;

use crate::core::charts::{
    BarChart, ChartRegistry, ChartSpec, DonutChart, GroupedBarChart, Projection,
};
use crate::core::format;

/// Palette shared by the three projections.
const SERIES_COLORS: [&str; 3] = ["#5b8def", "#ef6480", "#4fb8a8"];

const GROUPED_W: f64 = 560.0;
const GROUPED_H: f64 = 300.0;
const GROUPED_TOP: f64 = 40.0;
const GROUPED_BOTTOM: f64 = 36.0;
const GROUPED_SIDE: f64 = 16.0;

const DONUT_SIZE: f64 = 260.0;
const DONUT_RADIUS: f64 = 80.0;

const HBAR_W: f64 = 560.0;
const HBAR_ROW: f64 = 28.0;
const HBAR_LABEL_W: f64 = 150.0;
const HBAR_VALUE_GUTTER: f64 = 60.0;

/// All three projection cards, painted from whatever the registry holds.
#[component]
pub fn ReportCharts(registry: ChartRegistry) -> Element {
    rsx! {
        div { class: "report-charts",
            for projection in Projection::ALL {
                {projection_card(&registry, projection)}
            }
        }
    }
}

fn projection_card(registry: &ChartRegistry, projection: Projection) -> Element {
    let body = registry.get(projection).map(|instance| match &instance.spec {
        ChartSpec::GroupedBar(chart) => grouped_bar_svg(chart),
        ChartSpec::Donut(chart) => donut_svg(chart),
        ChartSpec::HorizontalBar(chart) => horizontal_bar_svg(chart),
    });

    rsx! {
        figure { class: "chart-card", id: "{projection.target_id()}",
            figcaption { class: "chart-card__title", "{projection.title()}" }
            if let Some(body) = body {
                {body}
            } else {
                p { class: "chart-card__placeholder", "Not rendered yet." }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LegendEntry {
    transform: String,
    color: &'static str,
    label: String,
}

#[derive(Debug, Clone, PartialEq)]
struct LaidOutBar {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
struct CategoryLabel {
    x: f64,
    text: String,
}

fn layout_grouped(chart: &GroupedBarChart) -> Vec<LaidOutBar> {
    let plot_w = GROUPED_W - 2.0 * GROUPED_SIDE;
    let plot_h = GROUPED_H - GROUPED_TOP - GROUPED_BOTTOM;
    let max = chart
        .series
        .iter()
        .flat_map(|series| series.values.iter().flatten().copied())
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let slot = plot_w / chart.categories.len().max(1) as f64;
    let bar_w = slot * 0.28;
    let series_count = chart.series.len() as f64;

    let mut bars = Vec::new();
    for category_index in 0..chart.categories.len() {
        let center = GROUPED_SIDE + (category_index as f64 + 0.5) * slot;
        for (series_index, series) in chart.series.iter().enumerate() {
            let Some(value) = series.values.get(category_index).copied().flatten() else {
                continue;
            };
            let height = plot_h * (value / max);
            bars.push(LaidOutBar {
                x: center + (series_index as f64 - series_count / 2.0) * (bar_w + 4.0) + 2.0,
                y: GROUPED_TOP + (plot_h - height),
                width: bar_w,
                height,
                color: SERIES_COLORS[series_index % SERIES_COLORS.len()],
            });
        }
    }
    bars
}

fn grouped_bar_svg(chart: &GroupedBarChart) -> Element {
    if chart.series.is_empty() {
        return rsx! {
            p { class: "chart-card__placeholder", "No comparable periods in this report." }
        };
    }

    let bars = layout_grouped(chart);
    let slot = (GROUPED_W - 2.0 * GROUPED_SIDE) / chart.categories.len().max(1) as f64;
    let baseline = GROUPED_H - GROUPED_BOTTOM;
    let baseline_end = GROUPED_W - GROUPED_SIDE;

    let legend: Vec<LegendEntry> = chart
        .series
        .iter()
        .enumerate()
        .map(|(index, series)| LegendEntry {
            transform: format!("translate({}, 10)", GROUPED_SIDE + index as f64 * 110.0),
            color: SERIES_COLORS[index % SERIES_COLORS.len()],
            label: series.label.clone(),
        })
        .collect();

    let labels: Vec<CategoryLabel> = chart
        .categories
        .iter()
        .enumerate()
        .map(|(index, category)| CategoryLabel {
            x: GROUPED_SIDE + (index as f64 + 0.5) * slot,
            text: category.clone(),
        })
        .collect();
    let label_y = baseline + 20.0;

    rsx! {
        svg {
            class: "chart chart--grouped",
            view_box: "0 0 560 300",
            role: "img",
            for entry in legend.iter() {
                g { transform: "{entry.transform}",
                    rect { width: "12", height: "12", rx: "2", fill: entry.color }
                    text { x: "18", y: "11", class: "chart__label", "{entry.label}" }
                }
            }
            line {
                x1: "{GROUPED_SIDE}",
                y1: "{baseline}",
                x2: "{baseline_end}",
                y2: "{baseline}",
                class: "chart__axis",
            }
            for bar in bars.iter() {
                rect {
                    x: "{bar.x}",
                    y: "{bar.y}",
                    width: "{bar.width}",
                    height: "{bar.height}",
                    rx: "2",
                    fill: bar.color,
                }
            }
            for label in labels.iter() {
                text {
                    x: "{label.x}",
                    y: "{label_y}",
                    text_anchor: "middle",
                    class: "chart__label",
                    "{label.text}"
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DonutArc {
    dash: String,
    offset: String,
    color: &'static str,
    share_label: String,
}

fn layout_donut(chart: &DonutChart) -> Vec<DonutArc> {
    let total: f64 = chart.segments.iter().map(|segment| segment.value).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let circumference = std::f64::consts::TAU * DONUT_RADIUS;
    let mut start = 0.0;
    chart
        .segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let fraction = segment.value / total;
            let length = fraction * circumference;
            let arc = DonutArc {
                dash: format!("{length:.2} {:.2}", circumference - length),
                offset: format!("{:.2}", -start * circumference),
                color: SERIES_COLORS[index % SERIES_COLORS.len()],
                share_label: format!(
                    "{} · {}",
                    segment.label,
                    format::format_percent(segment.value)
                ),
            };
            start += fraction;
            arc
        })
        .collect()
}

fn donut_svg(chart: &DonutChart) -> Element {
    let arcs = layout_donut(chart);
    if arcs.is_empty() {
        return rsx! {
            p { class: "chart-card__placeholder", "No subdivision data in this report." }
        };
    }

    let center = DONUT_SIZE / 2.0;
    let rotate = format!("rotate(-90 {center} {center})");

    rsx! {
        svg {
            class: "chart chart--donut",
            view_box: "0 0 260 260",
            role: "img",
            for arc in arcs.iter() {
                circle {
                    cx: "{center}",
                    cy: "{center}",
                    r: "{DONUT_RADIUS}",
                    fill: "none",
                    stroke: arc.color,
                    stroke_width: "36",
                    stroke_dasharray: "{arc.dash}",
                    stroke_dashoffset: "{arc.offset}",
                    transform: "{rotate}",
                }
            }
        }
        ul { class: "chart-legend",
            for arc in arcs.iter() {
                li {
                    span {
                        class: "chart-legend__swatch",
                        style: "background: {arc.color}",
                    }
                    "{arc.share_label}"
                }
            }
        }
        if let Some(caption) = chart.caption.as_ref() {
            p { class: "chart-card__caption", "{caption}" }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct HorizontalRow {
    bar_y: f64,
    text_y: f64,
    width: f64,
    value_x: f64,
    label: String,
    value_label: String,
}

fn layout_horizontal(chart: &BarChart) -> (f64, Vec<HorizontalRow>) {
    let max = chart
        .bars
        .iter()
        .map(|bar| bar.value)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let plot_w = HBAR_W - HBAR_LABEL_W - HBAR_VALUE_GUTTER;

    let rows = chart
        .bars
        .iter()
        .enumerate()
        .map(|(index, bar)| {
            let bar_y = 8.0 + index as f64 * HBAR_ROW;
            let width = plot_w * (bar.value / max);
            HorizontalRow {
                bar_y,
                text_y: bar_y + 14.0,
                width,
                value_x: HBAR_LABEL_W + width + 6.0,
                label: bar.label.clone(),
                value_label: format::format_value(bar.value),
            }
        })
        .collect::<Vec<_>>();

    let height = rows.len() as f64 * HBAR_ROW + 16.0;
    (height, rows)
}

fn horizontal_bar_svg(chart: &BarChart) -> Element {
    if chart.bars.is_empty() {
        return rsx! {
            p { class: "chart-card__placeholder", "No builder benchmark in this report." }
        };
    }

    let (height, rows) = layout_horizontal(chart);
    let view_box = format!("0 0 560 {height}");
    let label_x = HBAR_LABEL_W - 8.0;

    rsx! {
        svg {
            class: "chart chart--builders",
            view_box: "{view_box}",
            role: "img",
            for row in rows.iter() {
                text {
                    x: "{label_x}",
                    y: "{row.text_y}",
                    text_anchor: "end",
                    class: "chart__label",
                    "{row.label}"
                }
                rect {
                    x: "{HBAR_LABEL_W}",
                    y: "{row.bar_y}",
                    width: "{row.width}",
                    height: "18",
                    rx: "2",
                    fill: SERIES_COLORS[2],
                }
                text {
                    x: "{row.value_x}",
                    y: "{row.text_y}",
                    class: "chart__label",
                    "{row.value_label}"
                }
            }
        }
    }
}
