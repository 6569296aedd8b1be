use dioxus::prelude::*;
use once_cell::sync::OnceCell;

// Navbar stylesheet shared by every shell.
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so `ui` never needs to know a shell's `Route` enum. Each
/// closure receives its label and returns a link already containing it.
///
/// Shells call `register_nav` once, at the top of their root component,
/// before the first `AppNavbar` render. Without a registered builder the
/// navbar falls back to whatever raw `children` were passed.
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub analyze: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let internal_nav = NAV_BUILDER.get().map(|builder| {
        let home = (builder.home)("Home");
        let analyze = (builder.analyze)("Analyze");

        rsx! {
            nav { class: "navbar__links",
                {home}
                {analyze}
            }
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                // Brand
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Homescope" }
                    }
                    span { class: "navbar__brand-subtitle", "Market report analyzer" }
                }

                // Navigation (registered builder or legacy children)
                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }
            }
        }
    }
}
