//! Report rendering: components that paint the core view models, plus the
//! per-submission state they all share.

mod tables;
pub use tables::{BuilderBenchmarkCard, HousingActivityCard};

mod narrative;
pub use narrative::NarrativePanels;

mod charts;
pub use charts::ReportCharts;

mod export;
pub use export::ReportExportPanel;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::core::charts::ChartRegistry;
use crate::core::narrative::{build_narrative, NarrativeView};
use crate::core::payload::{ReportPayload, UpstreamNotice};
use crate::core::tables::{
    build_builder_table, build_housing_table, BuilderTableView, HousingTableView,
};

/// Everything one rendered report owns. Rebuilt wholesale from each
/// successful or partial response and swapped in as a unit, never merged
/// with a predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportState {
    pub housing: HousingTableView,
    pub builders: BuilderTableView,
    pub narrative: Option<NarrativeView>,
    pub charts: ChartRegistry,
    pub notice: Option<UpstreamNotice>,
    pub received_at: String,
}

impl ReportState {
    /// Tables first, then the narrative, then the chart projections: the
    /// fixed dispatch order for every rendered response.
    pub fn build(payload: ReportPayload, notice: Option<UpstreamNotice>) -> Self {
        let housing = build_housing_table(&payload);
        let builders = build_builder_table(&payload);
        let narrative = build_narrative(&payload);
        let mut charts = ChartRegistry::new();
        charts.render(&payload);

        Self {
            housing,
            builders,
            narrative,
            charts,
            notice,
            received_at: received_stamp(),
        }
    }
}

fn received_stamp() -> String {
    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year]-[month]-[day] [hour]:[minute] UTC"
        ))
        .unwrap_or_else(|_| "just now".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn state_carries_every_section_of_the_payload() {
        let payload = ReportPayload::from_value(json!({
            "housing_activity": {
                "QTR_CLOS": { "3Q24": 100, "4Q24": 90, "QOQ_CHANGE": -10.0 }
            },
            "subdivisions": { "Top10_Percentage": 30.0, "Top25_Percentage": 55.0 }
        }))
        .unwrap();

        let state = ReportState::build(payload, Some(UpstreamNotice::Capacity));
        assert_eq!(state.housing.rows.len(), 1);
        assert_eq!(state.charts.len(), 3);
        assert!(state.narrative.is_none());
        assert_eq!(state.notice, Some(UpstreamNotice::Capacity));
    }

    #[test]
    fn rebuilding_replaces_rather_than_merges() {
        let first = ReportPayload::from_value(json!({
            "housing_activity": {
                "QTR_CLOS": { "3Q24": 100, "4Q24": 90 },
                "QTR_STARTS": { "3Q24": 70, "4Q24": 80 }
            }
        }))
        .unwrap();
        let second = ReportPayload::from_value(json!({
            "housing_activity": {
                "QTR_CLOS": { "4Q24": 90, "1Q25": 95 }
            }
        }))
        .unwrap();

        let state = ReportState::build(first, None);
        assert_eq!(state.housing.rows.len(), 2);

        let state = ReportState::build(second, None);
        assert_eq!(state.housing.rows.len(), 1);
        assert_eq!(state.housing.current_heading, "1Q25");
    }
}
