//! Wire-format model and normalizer for analysis-service responses.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Reserved key carrying the derived quarter-over-quarter delta inside each
/// metric's period map. Never a period column and never a metric row.
pub const QOQ_CHANGE_KEY: &str = "QOQ_CHANGE";

/// Substring the upstream service embeds in `error` when analysis failed on a
/// quota/capacity condition rather than a processing fault.
const CAPACITY_MARKER: &str = "API quota";

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodValue {
    pub label: String,
    pub value: f64,
}

/// One housing-activity metric, with its period values in source order:
/// first = previous period, second = current period.
#[derive(Debug, Clone, PartialEq)]
pub struct HousingMetric {
    pub name: String,
    pub periods: Vec<PeriodValue>,
    pub qoq_change: f64,
}

impl HousingMetric {
    pub fn previous(&self) -> Option<&PeriodValue> {
        if self.periods.len() >= 2 {
            self.periods.first()
        } else {
            None
        }
    }

    /// The most recent period value. With a single reported period that one
    /// is treated as current.
    pub fn current(&self) -> Option<&PeriodValue> {
        match self.periods.len() {
            0 => None,
            1 => self.periods.first(),
            _ => self.periods.get(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subdivisions {
    #[serde(rename = "Top10_Percentage")]
    pub top10_percentage: f64,
    #[serde(rename = "Top25_Percentage")]
    pub top25_percentage: f64,
    #[serde(rename = "Total_Closings_All_Subdivisions", default)]
    pub total_closings: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuilderRecord {
    #[serde(rename = "Builder")]
    pub name: String,
    #[serde(rename = "Annual")]
    pub annual_closings: f64,
    #[serde(rename = "QoQ_Change", default)]
    pub qoq_change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BuilderBenchmark {
    #[serde(rename = "Builder_Data", default)]
    pub builders: Vec<BuilderRecord>,
    #[serde(rename = "Top10_Percentage", default)]
    pub top10_percentage: Option<f64>,
    #[serde(rename = "Top25_Percentage", default)]
    pub top25_percentage: Option<f64>,
    #[serde(rename = "Total_Annual_Closings", default)]
    pub total_annual_closings: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExecutiveSummary {
    pub overview: String,
    #[serde(rename = "keyFindings", default)]
    pub key_findings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiAnalysis {
    #[serde(rename = "executiveSummary")]
    pub executive_summary: ExecutiveSummary,
    #[serde(default)]
    pub recommendations: Recommendations,
}

/// Upstream problem classification, derived once at the parse boundary.
/// Everything downstream matches on this enum, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamNotice {
    Capacity,
    Generic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamError {
    pub message: String,
    pub notice: UpstreamNotice,
}

/// A normalized analysis report, rebuilt from scratch on every submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportPayload {
    pub housing_activity: Vec<HousingMetric>,
    pub subdivisions: Option<Subdivisions>,
    pub builder_benchmark: BuilderBenchmark,
    pub ai_analysis: Option<AiAnalysis>,
    pub error: Option<UpstreamError>,
}

impl ReportPayload {
    pub fn from_json_str(body: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Normalize a decoded JSON document. Fails only when the document lacks
    /// the minimum report shape: neither housing data nor an error indicator.
    /// Every other section is optional and tolerated when malformed, so a
    /// partially extracted report still renders.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        let root = value.as_object().ok_or(PayloadError::MissingShape)?;

        let error = root
            .get("error")
            .and_then(Value::as_str)
            .map(classify_error);
        let housing = root.get("housing_activity").and_then(Value::as_object);
        if housing.is_none() && error.is_none() {
            return Err(PayloadError::MissingShape);
        }

        let housing_activity = housing.map(parse_housing_activity).unwrap_or_default();
        let subdivisions = decode_section(root.get("subdivisions"));
        let builder_benchmark =
            decode_section::<BuilderBenchmark>(root.get("builder_benchmark")).unwrap_or_default();
        let ai_analysis = decode_section(root.get("ai_analysis"));

        Ok(Self {
            housing_activity,
            subdivisions,
            builder_benchmark,
            ai_analysis,
            error,
        })
    }

    pub fn has_housing_data(&self) -> bool {
        !self.housing_activity.is_empty()
    }
}

fn decode_section<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v.clone()).ok())
}

fn parse_housing_activity(map: &serde_json::Map<String, Value>) -> Vec<HousingMetric> {
    map.iter()
        .filter(|(name, _)| name.as_str() != QOQ_CHANGE_KEY)
        .filter_map(|(name, entry)| {
            let entry = entry.as_object()?;
            let mut periods = Vec::new();
            let mut qoq_change = 0.0;
            for (label, value) in entry {
                let Some(value) = value.as_f64() else { continue };
                if label == QOQ_CHANGE_KEY {
                    qoq_change = value;
                } else {
                    periods.push(PeriodValue {
                        label: label.clone(),
                        value,
                    });
                }
            }
            Some(HousingMetric {
                name: name.clone(),
                periods,
                qoq_change,
            })
        })
        .collect()
}

fn classify_error(message: &str) -> UpstreamError {
    let notice = if message.contains(CAPACITY_MARKER) {
        UpstreamNotice::Capacity
    } else {
        UpstreamNotice::Generic
    };
    UpstreamError {
        message: message.to_string(),
        notice,
    }
}

#[derive(Debug)]
pub enum PayloadError {
    /// Neither housing data nor an error indicator: not a report document.
    MissingShape,
    Json(serde_json::Error),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingShape => write!(f, "response is missing the report shape"),
            Self::Json(err) => write!(f, "response body is not valid JSON: {err}"),
        }
    }
}

impl std::error::Error for PayloadError {}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "housing_activity": {
                "QTR_CLOS": { "3Q24": 5143, "4Q24": 4780, "QOQ_CHANGE": -7.1 },
                "TOTAL_SUPPLY": { "3Q24": 4.7, "4Q24": 5.4, "QOQ_CHANGE": 14.9 }
            },
            "subdivisions": {
                "Top10_Percentage": 30.0,
                "Top25_Percentage": 55.0,
                "Total_Closings_All_Subdivisions": 19248
            },
            "builder_benchmark": {
                "Builder_Data": [
                    { "Builder": "A", "Annual": 500, "QoQ_Change": 5.0 },
                    { "Builder": "B", "Annual": 350 }
                ]
            }
        })
    }

    #[test]
    fn normalizes_metrics_in_source_order() {
        let payload = ReportPayload::from_value(sample()).unwrap();

        let names: Vec<&str> = payload
            .housing_activity
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, ["QTR_CLOS", "TOTAL_SUPPLY"]);

        let closings = &payload.housing_activity[0];
        assert_eq!(closings.previous().unwrap().label, "3Q24");
        assert_eq!(closings.current().unwrap().label, "4Q24");
        assert_eq!(closings.current().unwrap().value, 4780.0);
        assert_eq!(closings.qoq_change, -7.1);
    }

    #[test]
    fn reserved_delta_key_is_not_a_period_or_row() {
        let payload = ReportPayload::from_value(json!({
            "housing_activity": {
                "QTR_CLOS": { "3Q24": 100, "4Q24": 90, "QOQ_CHANGE": -10.0 },
                "QOQ_CHANGE": { "3Q24": 1, "4Q24": 2 }
            }
        }))
        .unwrap();

        assert_eq!(payload.housing_activity.len(), 1);
        assert_eq!(payload.housing_activity[0].periods.len(), 2);
    }

    #[test]
    fn missing_builder_delta_defaults_to_zero() {
        let payload = ReportPayload::from_value(sample()).unwrap();
        let builders = &payload.builder_benchmark.builders;
        assert_eq!(builders[1].name, "B");
        assert_eq!(builders[1].qoq_change_percent, 0.0);
    }

    #[test]
    fn analysis_section_is_optional() {
        let payload = ReportPayload::from_value(sample()).unwrap();
        assert!(payload.ai_analysis.is_none());
    }

    #[test]
    fn rejects_document_without_report_shape() {
        let err = ReportPayload::from_value(json!({ "status": "healthy" })).unwrap_err();
        assert!(matches!(err, PayloadError::MissingShape));

        let err = ReportPayload::from_value(json!(42)).unwrap_err();
        assert!(matches!(err, PayloadError::MissingShape));
    }

    #[test]
    fn error_only_document_is_accepted_and_classified() {
        let payload = ReportPayload::from_value(json!({
            "error": "AI analysis is currently unavailable due to API quota limits."
        }))
        .unwrap();

        assert!(!payload.has_housing_data());
        let upstream = payload.error.unwrap();
        assert_eq!(upstream.notice, UpstreamNotice::Capacity);

        let payload = ReportPayload::from_value(json!({
            "error": "Failed to generate analysis"
        }))
        .unwrap();
        assert_eq!(payload.error.unwrap().notice, UpstreamNotice::Generic);
    }

    #[test]
    fn single_period_metric_has_no_previous() {
        let payload = ReportPayload::from_value(json!({
            "housing_activity": {
                "QTR_CLOS": { "4Q24": 90 }
            }
        }))
        .unwrap();

        let metric = &payload.housing_activity[0];
        assert!(metric.previous().is_none());
        assert_eq!(metric.current().unwrap().label, "4Q24");
        assert_eq!(metric.qoq_change, 0.0);
    }

    #[test]
    fn invalid_json_reports_decode_error() {
        let err = ReportPayload::from_json_str("<html>oops</html>").unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
    }
}
