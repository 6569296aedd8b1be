use dioxus::prelude::*;

use crate::core::tables::{BuilderTableView, HousingTableView};

#[component]
pub fn HousingActivityCard(view: HousingTableView) -> Element {
    rsx! {
        section { class: "report-card report-card--housing",
            div { class: "report-card__header",
                h2 { "Housing Activity" }
                if !view.rows.is_empty() {
                    span { class: "report-card__meta", "{view.rows.len()} metrics" }
                }
            }

            if view.rows.is_empty() {
                p { class: "report-card__placeholder",
                    "No housing activity could be read from this report."
                }
            } else {
                table { class: "report-table",
                    thead {
                        tr {
                            th { "Metric" }
                            th { "{view.current_heading}" }
                            th { "{view.previous_heading}" }
                            th { "QoQ Change" }
                        }
                    }
                    tbody {
                        for row in view.rows.iter() {
                            tr {
                                td { "{row.label}" }
                                td { {row.current.clone().unwrap_or_default()} }
                                td { {row.previous.clone().unwrap_or_default()} }
                                td { class: "{row.delta_style.css_class()}", "{row.delta}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn BuilderBenchmarkCard(view: BuilderTableView) -> Element {
    rsx! {
        section { class: "report-card report-card--builders", id: "builder-qoq",
            div { class: "report-card__header",
                h2 { "Builder QoQ Change" }
                if let Some(total) = view.total_annual_closings.as_ref() {
                    span { class: "report-card__meta", "{total} annual closings overall" }
                }
            }

            if view.rows.is_empty() {
                p { class: "report-card__placeholder",
                    "No builder benchmark could be read from this report."
                }
            } else {
                table { class: "report-table",
                    thead {
                        tr {
                            th { "Builder" }
                            th { "QoQ Change (%)" }
                        }
                    }
                    tbody {
                        for row in view.rows.iter() {
                            tr {
                                td { "{row.name}" }
                                td { class: "{row.delta_style.css_class()}", "{row.delta}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
