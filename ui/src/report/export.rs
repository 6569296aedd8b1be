//! Print/export flow: a scoped print-layout override plus the panel that
//! triggers it.

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::core::platform;

/// How long the layout override stays applied after the print flow is
/// invoked; covers dialogs that resolve without any completion signal.
pub const REVERT_DELAY_MS: u64 = 1000;

/// Print-media layout override: interactive chrome is hidden and the report
/// content fills the page.
pub const PRINT_OVERRIDE_CSS: &str = r#"@media print {
    body * {
        visibility: hidden;
    }
    .report, .report * {
        visibility: visible;
    }
    .report {
        position: absolute;
        left: 0;
        top: 0;
        width: 100%;
        padding: 20px;
    }
    .navbar, .hero-section, .upload-card, .page-banner, button {
        display: none !important;
    }
    .report-card, .chart-card {
        border: none;
        box-shadow: none;
        page-break-inside: avoid;
    }
    .report-table {
        width: 100%;
    }
    svg {
        max-width: 100%;
        height: auto;
    }
    @page {
        size: letter;
        margin: 1cm;
    }
}"#;

/// Bookkeeping for live layout overrides. Every activation acquires its own
/// handle and releases exactly that handle, so overlapping activations
/// cannot strand each other's overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTracker {
    next_handle: u64,
    active: std::collections::BTreeSet<u64>,
}

impl OverrideTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self) -> u64 {
        self.next_handle += 1;
        self.active.insert(self.next_handle);
        self.next_handle
    }

    /// Returns `false` when the handle was already released.
    pub fn release(&mut self, handle: u64) -> bool {
        self.active.remove(&handle)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static OVERRIDES: std::cell::RefCell<OverrideTracker> =
        std::cell::RefCell::new(OverrideTracker::new());
}

/// Apply the print layout override, run the platform print flow, and revert
/// the override after [`REVERT_DELAY_MS`] whether printing completed or was
/// cancelled. Safe to invoke repeatedly: each call owns its own style node
/// and tracker handle, and removes exactly those.
#[cfg(target_arch = "wasm32")]
pub fn activate_print_view() -> Result<(), String> {
    let window = web_sys::window().ok_or("window unavailable")?;
    let document = window.document().ok_or("document unavailable")?;
    let head = document.head().ok_or("missing document head")?;

    let handle = OVERRIDES.with(|tracker| tracker.borrow_mut().acquire());
    let style = document
        .create_element("style")
        .map_err(|_| "unable to create the print override")?;
    style.set_text_content(Some(PRINT_OVERRIDE_CSS));
    style
        .set_attribute("data-print-override", &handle.to_string())
        .ok();
    head.append_child(&style)
        .map_err(|_| "unable to attach the print override")?;

    let outcome = window.print();

    platform::spawn_future(async move {
        platform::sleep_ms(REVERT_DELAY_MS).await;
        style.remove();
        OVERRIDES.with(|tracker| tracker.borrow_mut().release(handle));
    });

    outcome.map_err(|_| "print flow rejected".to_string())
}

#[component]
pub fn ReportExportPanel() -> Element {
    let mut status = use_signal(|| Option::<String>::None);

    let on_export = move |_| {
        #[cfg(target_arch = "wasm32")]
        match activate_print_view() {
            Ok(()) => status.set(None),
            Err(err) => status.set(Some(format!("Couldn't open the print view: {err}"))),
        }

        #[cfg(not(target_arch = "wasm32"))]
        status.set(Some("Printing is available in the web app.".to_string()));
    };

    rsx! {
        div { class: "report-export",
            button {
                r#type: "button",
                class: "button button--ghost",
                id: "export-report",
                onclick: on_export,
                "Export as PDF"
            }
            if let Some(message) = status() {
                p { class: "report-export__status", "{message}" }
            }
        }
    }
}
