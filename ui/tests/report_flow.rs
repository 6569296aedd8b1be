//! End-to-end pipeline checks: raw response body → classification → view
//! models and chart projections, the way the Analyze view drives them.

use ui::core::charts::{ChartSpec, Projection};
use ui::core::payload::UpstreamNotice;
use ui::core::submission::{self, classify_response, SubmissionOutcome};
use ui::core::tables::DeltaStyle;
use ui::report::ReportState;

const SCENARIO_BODY: &str = r#"{
    "housing_activity": {
        "closings": { "3Q24": 100, "4Q24": 90, "QOQ_CHANGE": -10 }
    },
    "subdivisions": { "Top10_Percentage": 30, "Top25_Percentage": 55 },
    "builder_benchmark": {
        "Builder_Data": [ { "Builder": "A", "Annual": 500, "QoQ_Change": 5 } ]
    }
}"#;

#[test]
fn a_clean_response_renders_tables_and_charts() {
    let SubmissionOutcome::Success(payload) = classify_response(200, SCENARIO_BODY) else {
        panic!("expected a full success");
    };
    let state = ReportState::build(payload, None);

    assert_eq!(state.housing.rows.len(), 1);
    let row = &state.housing.rows[0];
    assert_eq!(row.label, "closings");
    assert_eq!(row.current.as_deref(), Some("90"));
    assert_eq!(row.previous.as_deref(), Some("100"));
    assert_eq!(row.delta, "-10%");
    assert_eq!(row.delta_style, DeltaStyle::Negative);

    let donut = state
        .charts
        .get(Projection::SubdivisionConcentration)
        .expect("donut projection");
    let ChartSpec::Donut(chart) = &donut.spec else {
        panic!("wrong spec for the donut slot");
    };
    let segments: Vec<f64> = chart.segments.iter().map(|s| s.value).collect();
    assert_eq!(segments, [30.0, 25.0, 45.0]);

    let builders = state
        .charts
        .get(Projection::BuilderClosings)
        .expect("builder projection");
    let ChartSpec::HorizontalBar(chart) = &builders.spec else {
        panic!("wrong spec for the builder slot");
    };
    assert_eq!(chart.bars.len(), 1);
    assert_eq!(chart.bars[0].label, "A");
    assert_eq!(chart.bars[0].value, 500.0);

    // No analysis text in the body: the narrative section renders nothing.
    assert!(state.narrative.is_none());
    assert_eq!(state.charts.len(), 3);
}

#[test]
fn a_quota_limited_response_still_renders_with_an_advisory() {
    let body = r#"{
        "error": "API quota exceeded",
        "housing_activity": {
            "closings": { "3Q24": 100, "4Q24": 90, "QOQ_CHANGE": -10 }
        }
    }"#;

    let SubmissionOutcome::Partial(payload, notice) = classify_response(200, body) else {
        panic!("expected a partial success");
    };
    assert_eq!(notice, UpstreamNotice::Capacity);

    let state = ReportState::build(payload, Some(notice));
    assert_eq!(state.housing.rows.len(), 1);
    assert_eq!(state.charts.len(), 3);
    assert_eq!(state.notice, Some(UpstreamNotice::Capacity));
    assert!(submission::notice_message(notice).contains("still be displayed"));
}

#[test]
fn a_server_error_never_reaches_the_renderers() {
    let outcome = classify_response(500, SCENARIO_BODY);
    let SubmissionOutcome::Failed(kind) = outcome else {
        panic!("expected a failure");
    };
    assert!(!submission::failure_message(&kind).is_empty());
}

#[test]
fn resubmitting_swaps_the_whole_report() {
    let SubmissionOutcome::Success(first) = classify_response(200, SCENARIO_BODY) else {
        panic!("expected a full success");
    };
    let second_body = r#"{
        "housing_activity": {
            "starts": { "4Q24": 50, "1Q25": 60, "QOQ_CHANGE": 20 }
        }
    }"#;
    let SubmissionOutcome::Success(second) = classify_response(200, second_body) else {
        panic!("expected a full success");
    };

    let state = ReportState::build(first, None);
    let first_generation = state
        .charts
        .get(Projection::ActivityComparison)
        .unwrap()
        .generation;
    assert_eq!(state.housing.rows[0].label, "closings");

    let state = ReportState::build(second, None);
    assert_eq!(state.housing.rows.len(), 1);
    assert_eq!(state.housing.rows[0].label, "starts");
    assert_eq!(state.housing.current_heading, "1Q25");
    // A fresh registry per report: still exactly one instance per slot.
    assert_eq!(state.charts.len(), 3);
    assert!(state
        .charts
        .get(Projection::ActivityComparison)
        .unwrap()
        .generation
        >= first_generation);
}
