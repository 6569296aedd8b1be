use dioxus::prelude::*;

#[component]
pub fn Hero() -> Element {
    rsx! {
        section { class: "hero-section",
            h1 { "Market reports, decoded" }
            p {
                "Upload a quarterly market summary and get comparison tables, charts, and analyst commentary in one view."
            }
        }
    }
}
