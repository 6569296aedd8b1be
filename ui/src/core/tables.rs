//! Structural view models for the report's tabular sections. No markup here:
//! rows, cells, and css classes only, so any rendering surface can consume
//! them.

use crate::core::format;
use crate::core::payload::ReportPayload;

/// Sign-based styling for delta cells. Total over all inputs: zero counts as
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaStyle {
    Positive,
    Negative,
}

impl DeltaStyle {
    pub fn classify(delta: f64) -> Self {
        if delta >= 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Positive => "delta delta--positive",
            Self::Negative => "delta delta--negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HousingRow {
    pub label: String,
    pub current: Option<String>,
    pub previous: Option<String>,
    pub delta: String,
    pub delta_style: DeltaStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HousingTableView {
    pub current_heading: String,
    pub previous_heading: String,
    pub rows: Vec<HousingRow>,
}

/// One row per housing metric, in source order. Period column headings come
/// from the payload's own period labels when at least one metric carries a
/// full pair; metrics with fewer than two periods keep their row with the
/// unavailable cells left empty.
pub fn build_housing_table(payload: &ReportPayload) -> HousingTableView {
    let headings = payload
        .housing_activity
        .iter()
        .find(|metric| metric.periods.len() >= 2)
        .map(|metric| (metric.periods[1].label.clone(), metric.periods[0].label.clone()));
    let (current_heading, previous_heading) = headings
        .unwrap_or_else(|| ("Current Quarter".to_string(), "Previous Quarter".to_string()));

    let rows = payload
        .housing_activity
        .iter()
        .map(|metric| HousingRow {
            label: metric.name.replace('_', " "),
            current: metric.current().map(|p| format::format_value(p.value)),
            previous: metric.previous().map(|p| format::format_value(p.value)),
            delta: format::format_percent(metric.qoq_change),
            delta_style: DeltaStyle::classify(metric.qoq_change),
        })
        .collect();

    HousingTableView {
        current_heading,
        previous_heading,
        rows,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuilderRow {
    pub name: String,
    pub delta: String,
    pub delta_style: DeltaStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuilderTableView {
    pub rows: Vec<BuilderRow>,
    pub total_annual_closings: Option<String>,
}

/// One row per builder, preserving the payload's order exactly so the table
/// stays aligned with the builder chart built from the same sequence.
pub fn build_builder_table(payload: &ReportPayload) -> BuilderTableView {
    let rows = payload
        .builder_benchmark
        .builders
        .iter()
        .map(|builder| BuilderRow {
            name: builder.name.clone(),
            delta: format::format_percent(builder.qoq_change_percent),
            delta_style: DeltaStyle::classify(builder.qoq_change_percent),
        })
        .collect();

    BuilderTableView {
        rows,
        total_annual_closings: payload
            .builder_benchmark
            .total_annual_closings
            .map(format::format_value),
    }
}
