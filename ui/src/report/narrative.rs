use dioxus::prelude::*;

use crate::core::narrative::NarrativeView;

/// Executive summary and recommendations, in their fixed order. Callers
/// include this only when the narrative exists; an absent analysis renders
/// no shell at all.
#[component]
pub fn NarrativePanels(view: NarrativeView) -> Element {
    rsx! {
        section { class: "report-card report-card--summary",
            div { class: "report-card__header",
                h2 { "Executive Summary" }
            }
            div { class: "analysis-text",
                p { "{view.overview}" }
                h5 { "Key Findings:" }
                ul {
                    for finding in view.key_findings.iter() {
                        li { "{finding}" }
                    }
                }
            }
        }

        section { class: "report-card report-card--recommendations",
            div { class: "report-card__header",
                h2 { "Recommendations" }
            }
            div { class: "analysis-text",
                h5 { "Market Opportunities:" }
                ul {
                    for opportunity in view.opportunities.iter() {
                        li { "{opportunity}" }
                    }
                }
                h5 { "Strategic Actions:" }
                ul {
                    for action in view.actions.iter() {
                        li { "{action}" }
                    }
                }
            }
        }
    }
}
