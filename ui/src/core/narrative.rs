//! Narrative view model for the optional analysis text.

use crate::core::payload::ReportPayload;

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeView {
    pub overview: String,
    pub key_findings: Vec<String>,
    pub opportunities: Vec<String>,
    pub actions: Vec<String>,
}

/// `None` when the payload carries no analysis; callers render nothing for
/// the section, not an empty shell. Text passes through verbatim, in the
/// fixed order overview → key findings → opportunities → actions.
pub fn build_narrative(payload: &ReportPayload) -> Option<NarrativeView> {
    let analysis = payload.ai_analysis.as_ref()?;
    Some(NarrativeView {
        overview: analysis.executive_summary.overview.clone(),
        key_findings: analysis.executive_summary.key_findings.clone(),
        opportunities: analysis.recommendations.opportunities.clone(),
        actions: analysis.recommendations.actions.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payload::ReportPayload;
    use serde_json::json;

    #[test]
    fn absent_analysis_renders_nothing() {
        let payload = ReportPayload::from_value(json!({
            "housing_activity": { "QTR_CLOS": { "3Q24": 1, "4Q24": 2 } }
        }))
        .unwrap();

        assert!(build_narrative(&payload).is_none());
    }

    #[test]
    fn items_pass_through_verbatim() {
        let payload = ReportPayload::from_value(json!({
            "housing_activity": {},
            "ai_analysis": {
                "executiveSummary": {
                    "overview": "Closings cooled while inventory grew.",
                    "keyFindings": ["Starts fell 13.6% QoQ", "  padded text stays  "]
                },
                "recommendations": {
                    "opportunities": ["New-build roofing demand"],
                    "actions": ["Target top-10 subdivisions"]
                }
            }
        }))
        .unwrap();

        let view = build_narrative(&payload).unwrap();
        assert_eq!(view.overview, "Closings cooled while inventory grew.");
        assert_eq!(view.key_findings[1], "  padded text stays  ");
        assert_eq!(view.opportunities, ["New-build roofing demand"]);
        assert_eq!(view.actions, ["Target top-10 subdivisions"]);
    }
}
