use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;

use crate::core::client::{self, SelectedFile};
use crate::core::submission::{
    self, FailureKind, SubmissionGate, SubmissionOutcome, SubmitBlocked,
};
use crate::report::{
    BuilderBenchmarkCard, HousingActivityCard, NarrativePanels, ReportCharts, ReportExportPanel,
    ReportState,
};

#[component]
pub fn Analyze() -> Element {
    let selected_file = use_signal(|| Option::<SelectedFile>::None);
    let gate = use_signal(SubmissionGate::new);
    let report = use_signal(|| Option::<ReportState>::None);
    let banner = use_signal(|| Option::<Banner>::None);
    let results_shown = use_signal(|| false);

    let sender_slot: Rc<RefCell<Option<UnboundedSender<AnalyzeEvent>>>> =
        Rc::new(RefCell::new(None));
    let sender_slot_for_loop = sender_slot.clone();

    let coroutine = {
        let file_ref = selected_file.clone();
        let gate_ref = gate.clone();
        let report_ref = report.clone();
        let banner_ref = banner.clone();
        let results_ref = results_shown.clone();

        use_coroutine(move |mut rx: UnboundedReceiver<AnalyzeEvent>| {
            let sender_slot = sender_slot_for_loop.clone();
            let mut file_signal = file_ref.clone();
            let mut gate_signal = gate_ref.clone();
            let mut report_signal = report_ref.clone();
            let mut banner_signal = banner_ref.clone();
            let mut results_signal = results_ref.clone();

            async move {
                while let Some(event) = rx.next().await {
                    match event {
                        AnalyzeEvent::FilePicked(file) => {
                            file_signal.set(Some(file));
                        }
                        AnalyzeEvent::FileCleared => {
                            file_signal.set(None);
                        }
                        AnalyzeEvent::Submit => {
                            let has_file = file_signal.with(|file| file.is_some());
                            if let Err(blocked) =
                                gate_signal.with_mut(|gate| gate.begin(has_file))
                            {
                                banner_signal.set(Some(Banner::blocked(blocked)));
                                continue;
                            }

                            let Some(file) = file_signal.with(|file| file.clone()) else {
                                gate_signal.with_mut(|gate| gate.finish());
                                continue;
                            };

                            banner_signal.set(None);
                            match sender_slot.borrow().as_ref().cloned() {
                                Some(sender) => queue_submission(sender, file),
                                None => gate_signal.with_mut(|gate| gate.finish()),
                            }
                        }
                        AnalyzeEvent::Resolved(outcome) => {
                            apply_outcome(outcome, &mut report_signal, &mut banner_signal);

                            // Terminal bookkeeping is unconditional: the
                            // loading indicator clears and the results
                            // section shows no matter how the exchange went.
                            gate_signal.with_mut(|gate| gate.finish());
                            results_signal.set(true);
                        }
                    }
                }
            }
        })
    };

    sender_slot.borrow_mut().replace(coroutine.tx());

    let send_event = {
        let coroutine = coroutine.clone();
        move |event: AnalyzeEvent| {
            coroutine.send(event);
        }
    };

    let on_file_change = {
        let send_event = send_event.clone();
        move |evt: FormEvent| {
            let send_event = send_event.clone();
            if let Some(engine) = evt.files() {
                spawn(async move {
                    let Some(name) = engine.files().first().cloned() else {
                        send_event(AnalyzeEvent::FileCleared);
                        return;
                    };
                    match engine.read_file(&name).await {
                        Some(bytes) => {
                            send_event(AnalyzeEvent::FilePicked(SelectedFile { name, bytes }))
                        }
                        None => send_event(AnalyzeEvent::FileCleared),
                    }
                });
            }
        }
    };

    let on_submit = {
        let send_event = send_event.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            send_event(AnalyzeEvent::Submit);
        }
    };

    let is_submitting = gate.with(|gate| gate.is_submitting());
    let file_name = selected_file.with(|file| file.as_ref().map(|f| f.name.clone()));
    let banner_view = banner();
    let current_report = report();
    let show_results = results_shown() && !is_submitting;

    rsx! {
        section { class: "page page-analyze",
            h1 { "Analyze a market report" }
            p {
                "Upload a quarterly market summary PDF. The analysis service extracts the numbers; everything renders right here."
            }

            div { class: "upload-card",
                form { onsubmit: on_submit,
                    label { class: "upload-card__label", r#for: "report-file", "Market report (PDF)" }
                    input {
                        r#type: "file",
                        id: "report-file",
                        accept: ".pdf",
                        onchange: on_file_change,
                    }
                    button {
                        r#type: "submit",
                        class: "button button--primary",
                        disabled: is_submitting,
                        "Analyze Report"
                    }
                }
                if let Some(name) = file_name {
                    p { class: "upload-card__file", "Selected: {name}" }
                }
            }

            if let Some(banner) = banner_view {
                p { class: "{banner.class}", "{banner.message}" }
            }

            if is_submitting {
                div { class: "loading", id: "loading",
                    span { class: "loading__spinner", aria_hidden: "true" }
                    "Analyzing report…"
                }
            }

            if show_results {
                div { class: "report", id: "results",
                    match current_report {
                        Some(state) => rsx! {
                            div { class: "report__meta",
                                span { class: "report__stamp", "Received {state.received_at}" }
                                ReportExportPanel {}
                            }

                            HousingActivityCard { view: state.housing.clone() }

                            if let Some(narrative) = state.narrative.clone() {
                                NarrativePanels { view: narrative }
                            }

                            ReportCharts { registry: state.charts.clone() }

                            BuilderBenchmarkCard { view: state.builders.clone() }
                        },
                        None => rsx! {
                            p { class: "report__placeholder",
                                "No report could be rendered from the last submission."
                            }
                        },
                    }
                }
            }
        }
    }
}

/// Route a dispatched request off the event loop; the terminal outcome comes
/// back as a single `Resolved` event. Transport faults classify here so the
/// loop only ever sees finished outcomes.
fn queue_submission(sender: UnboundedSender<AnalyzeEvent>, file: SelectedFile) {
    spawn(async move {
        let outcome = match client::submit_report(file).await {
            Ok(reply) => submission::classify_response(reply.status, &reply.body),
            Err(_) => SubmissionOutcome::Failed(FailureKind::Transport),
        };
        let _ = sender.unbounded_send(AnalyzeEvent::Resolved(outcome));
    });
}

fn apply_outcome(
    outcome: SubmissionOutcome,
    report: &mut Signal<Option<ReportState>>,
    banner: &mut Signal<Option<Banner>>,
) {
    match outcome {
        SubmissionOutcome::Success(payload) => {
            report.set(Some(ReportState::build(payload, None)));
            banner.set(None);
        }
        SubmissionOutcome::Partial(payload, notice) => {
            report.set(Some(ReportState::build(payload, Some(notice))));
            banner.set(Some(Banner::advisory(submission::notice_message(notice))));
        }
        SubmissionOutcome::Failed(kind) => {
            // Prior results are left exactly as they were: failures never
            // partially update the rendered report.
            banner.set(Some(Banner::failure(submission::failure_message(&kind))));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Banner {
    class: &'static str,
    message: String,
}

impl Banner {
    fn advisory(message: &str) -> Self {
        Self {
            class: "page-banner page-banner--advisory",
            message: message.to_string(),
        }
    }

    fn failure(message: &str) -> Self {
        Self {
            class: "page-banner page-banner--error",
            message: message.to_string(),
        }
    }

    fn blocked(blocked: SubmitBlocked) -> Self {
        Self {
            class: "page-banner page-banner--error",
            message: submission::blocked_message(blocked).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
enum AnalyzeEvent {
    FilePicked(SelectedFile),
    FileCleared,
    Submit,
    Resolved(SubmissionOutcome),
}
