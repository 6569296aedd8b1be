//! Chart projections derived from report payloads, and the registry owning
//! their live instances. Builders are pure; the registry enforces the
//! replace-don't-accumulate lifecycle.

use std::collections::BTreeMap;

use crate::core::payload::ReportPayload;

/// Fixed category order for the activity comparison chart. Categories absent
/// from a payload chart as missing values, not as errors.
pub const ACTIVITY_CATEGORIES: [&str; 4] = ["QTR_CLOS", "QTR_STARTS", "TOTAL_INV", "TOTAL_SUPPLY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Projection {
    ActivityComparison,
    SubdivisionConcentration,
    BuilderClosings,
}

impl Projection {
    /// Fixed render order for a full report.
    pub const ALL: [Projection; 3] = [
        Projection::ActivityComparison,
        Projection::SubdivisionConcentration,
        Projection::BuilderClosings,
    ];

    /// Stable id of the view target hosting this projection.
    pub fn target_id(self) -> &'static str {
        match self {
            Self::ActivityComparison => "activity-comparison-chart",
            Self::SubdivisionConcentration => "subdivision-chart",
            Self::BuilderClosings => "builder-chart",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::ActivityComparison => "Housing Activity",
            Self::SubdivisionConcentration => "Subdivision Concentration",
            Self::BuilderClosings => "Builder Annual Closings",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// One slot per category, aligned to the chart's category order.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedBarChart {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutSegment {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DonutChart {
    pub segments: Vec<DonutSegment>,
    /// Optional context line shown with the legend.
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarChart {
    pub bars: Vec<Bar>,
}

/// Grouped bars over the fixed activity categories, one series per period.
/// Period labels are taken from the payload's first fully-reported metric,
/// never hardcoded. Values are matched per category by period label, so a
/// metric missing one period leaves a gap instead of shifting columns.
pub fn build_activity_comparison(payload: &ReportPayload) -> GroupedBarChart {
    let labels = payload
        .housing_activity
        .iter()
        .find(|metric| metric.periods.len() >= 2)
        .map(|metric| (metric.periods[0].label.clone(), metric.periods[1].label.clone()));
    let Some((previous_label, current_label)) = labels else {
        return GroupedBarChart::default();
    };

    let value_at = |category: &str, period_label: &str| -> Option<f64> {
        payload
            .housing_activity
            .iter()
            .find(|metric| metric.name == category)?
            .periods
            .iter()
            .find(|period| period.label == period_label)
            .map(|period| period.value)
    };

    let series_for = |period_label: &str| Series {
        label: period_label.to_string(),
        values: ACTIVITY_CATEGORIES
            .iter()
            .map(|category| value_at(category, period_label))
            .collect(),
    };

    GroupedBarChart {
        categories: ACTIVITY_CATEGORIES
            .iter()
            .map(|category| category.replace('_', " "))
            .collect(),
        series: vec![series_for(&previous_label), series_for(&current_label)],
    }
}

/// Three proportional segments. Derived segments are clamped at zero so an
/// upstream ordering violation (top10 > top25) degrades the picture instead
/// of producing negative sweep values.
pub fn build_subdivision_donut(payload: &ReportPayload) -> DonutChart {
    let Some(subdivisions) = payload.subdivisions.as_ref() else {
        return DonutChart::default();
    };

    let top10 = subdivisions.top10_percentage.max(0.0);
    let middle = (subdivisions.top25_percentage - subdivisions.top10_percentage).max(0.0);
    let remaining = (100.0 - subdivisions.top25_percentage).max(0.0);

    DonutChart {
        caption: subdivisions.total_closings.map(|total| {
            format!(
                "{} closings across all subdivisions",
                crate::core::format::format_value(total)
            )
        }),
        segments: vec![
            DonutSegment {
                label: "Top 10".to_string(),
                value: top10,
            },
            DonutSegment {
                label: "Top 11–25".to_string(),
                value: middle,
            },
            DonutSegment {
                label: "Remaining".to_string(),
                value: remaining,
            },
        ],
    }
}

/// One horizontal bar per builder, in the payload's order, so the chart and
/// the QoQ table built from the same sequence stay visually aligned.
pub fn build_builder_closings(payload: &ReportPayload) -> BarChart {
    BarChart {
        bars: payload
            .builder_benchmark
            .builders
            .iter()
            .map(|builder| Bar {
                label: builder.name.clone(),
                value: builder.annual_closings,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    GroupedBar(GroupedBarChart),
    Donut(DonutChart),
    HorizontalBar(BarChart),
}

/// A live chart bound to its projection's view target.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub spec: ChartSpec,
    /// Monotonic creation stamp across the registry.
    pub generation: u64,
}

/// Owner of the live chart instances, keyed by projection. At most one
/// instance per projection can exist: `replace` releases the prior instance
/// before installing the next.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartRegistry {
    slots: BTreeMap<Projection, ChartInstance>,
    generation: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release-then-create. Returns the released instance, if any, so
    /// callers can observe the handoff.
    pub fn replace(&mut self, projection: Projection, spec: ChartSpec) -> Option<ChartInstance> {
        let released = self.slots.remove(&projection);
        self.generation += 1;
        self.slots.insert(
            projection,
            ChartInstance {
                spec,
                generation: self.generation,
            },
        );
        released
    }

    /// Rebuild every projection from a payload, in fixed order.
    pub fn render(&mut self, payload: &ReportPayload) {
        self.replace(
            Projection::ActivityComparison,
            ChartSpec::GroupedBar(build_activity_comparison(payload)),
        );
        self.replace(
            Projection::SubdivisionConcentration,
            ChartSpec::Donut(build_subdivision_donut(payload)),
        );
        self.replace(
            Projection::BuilderClosings,
            ChartSpec::HorizontalBar(build_builder_closings(payload)),
        );
    }

    pub fn get(&self, projection: Projection) -> Option<&ChartInstance> {
        self.slots.get(&projection)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ReportPayload {
        ReportPayload::from_value(value).unwrap()
    }

    fn full_sample() -> ReportPayload {
        payload(json!({
            "housing_activity": {
                "QTR_CLOS": { "3Q24": 100, "4Q24": 90, "QOQ_CHANGE": -10.0 },
                "QTR_STARTS": { "3Q24": 5004, "4Q24": 4321, "QOQ_CHANGE": -13.6 },
                "TOTAL_SUPPLY": { "3Q24": 4.7, "4Q24": 5.4, "QOQ_CHANGE": 14.9 }
            },
            "subdivisions": { "Top10_Percentage": 30.0, "Top25_Percentage": 55.0 },
            "builder_benchmark": {
                "Builder_Data": [
                    { "Builder": "A", "Annual": 500, "QoQ_Change": 5.0 },
                    { "Builder": "B", "Annual": 350, "QoQ_Change": -2.0 }
                ]
            }
        }))
    }

    #[test]
    fn activity_series_use_period_labels_from_the_data() {
        let chart = build_activity_comparison(&full_sample());

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, "3Q24");
        assert_eq!(chart.series[1].label, "4Q24");
        assert_eq!(
            chart.categories,
            ["QTR CLOS", "QTR STARTS", "TOTAL INV", "TOTAL SUPPLY"]
        );

        // TOTAL_INV is absent from the payload: a gap, not an error.
        assert_eq!(chart.series[0].values[0], Some(100.0));
        assert_eq!(chart.series[1].values[0], Some(90.0));
        assert_eq!(chart.series[0].values[2], None);
        assert_eq!(chart.series[1].values[3], Some(5.4));
    }

    #[test]
    fn activity_chart_is_empty_without_a_period_pair() {
        let chart = build_activity_comparison(&payload(json!({
            "housing_activity": { "QTR_CLOS": { "4Q24": 90 } }
        })));
        assert_eq!(chart, GroupedBarChart::default());
    }

    #[test]
    fn donut_segments_partition_the_whole() {
        let chart = build_subdivision_donut(&full_sample());

        let values: Vec<f64> = chart.segments.iter().map(|s| s.value).collect();
        assert_eq!(values, [30.0, 25.0, 45.0]);
        assert_relative_eq!(values.iter().sum::<f64>(), 100.0);
    }

    #[test]
    fn donut_clamps_violated_ordering_to_zero() {
        let chart = build_subdivision_donut(&payload(json!({
            "housing_activity": {},
            "subdivisions": { "Top10_Percentage": 30.0, "Top25_Percentage": 20.0 }
        })));

        let values: Vec<f64> = chart.segments.iter().map(|s| s.value).collect();
        assert_eq!(values, [30.0, 0.0, 80.0]);
        assert!(values.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn missing_subdivisions_produce_an_empty_donut() {
        let chart = build_subdivision_donut(&payload(json!({ "housing_activity": {} })));
        assert!(chart.segments.is_empty());
    }

    #[test]
    fn builder_chart_order_matches_builder_table_order() {
        let sample = full_sample();
        let chart = build_builder_closings(&sample);
        let table = crate::core::tables::build_builder_table(&sample);

        let chart_names: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        let table_names: Vec<&str> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(chart_names, table_names);
        assert_eq!(chart.bars[0].value, 500.0);
    }

    #[test]
    fn registry_replaces_instead_of_accumulating() {
        let sample = full_sample();
        let mut registry = ChartRegistry::new();

        registry.render(&sample);
        assert_eq!(registry.len(), 3);
        let first_generation = registry
            .get(Projection::ActivityComparison)
            .unwrap()
            .generation;

        registry.render(&sample);
        assert_eq!(registry.len(), 3);
        let second_generation = registry
            .get(Projection::ActivityComparison)
            .unwrap()
            .generation;
        assert!(second_generation > first_generation);
    }

    #[test]
    fn replace_hands_back_the_released_instance() {
        let mut registry = ChartRegistry::new();

        let released = registry.replace(
            Projection::BuilderClosings,
            ChartSpec::HorizontalBar(BarChart::default()),
        );
        assert!(released.is_none());

        let released = registry.replace(
            Projection::BuilderClosings,
            ChartSpec::HorizontalBar(build_builder_closings(&full_sample())),
        );
        assert!(released.is_some());
        assert_eq!(registry.len(), 1);
    }
}
