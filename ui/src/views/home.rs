use dioxus::prelude::*;

use crate::Hero;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "page page-home",
            Hero {}

            ul { class: "page-home__features",
                li { "Quarter-over-quarter housing activity with signed deltas" }
                li { "Subdivision concentration and builder benchmark charts" }
                li { "Print-ready export of the rendered report" }
            }
            p { class: "page-home__cta",
                "Head to Analyze and upload a report to get started."
            }
        }
    }
}
