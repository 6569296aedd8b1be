//! Submission lifecycle: the pre-flight gate, response classification, and
//! the user-facing copy for every outcome.

use crate::core::payload::{PayloadError, ReportPayload, UpstreamNotice};

/// Interface-level submission state. A submission is either quiescent or in
/// flight; terminal results are reported through [`SubmissionOutcome`] and
/// the gate returns to `Idle` unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
}

/// Why a submit action was refused before any request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    NoFileSelected,
    /// A submission is already in flight. Overlapping submissions are
    /// rejected, not queued.
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionGate {
    phase: SubmissionPhase,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Guarded `Idle → Submitting` transition. A refusal leaves the gate
    /// untouched, so loading and results visibility never move.
    pub fn begin(&mut self, file_selected: bool) -> Result<(), SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::InFlight);
        }
        if !file_selected {
            return Err(SubmitBlocked::NoFileSelected);
        }
        self.phase = SubmissionPhase::Submitting;
        Ok(())
    }

    /// Unconditional return to `Idle`, called on every terminal outcome so
    /// the view can never get stuck mid-transition.
    pub fn finish(&mut self) {
        self.phase = SubmissionPhase::Idle;
    }
}

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(ReportPayload),
    /// The service reported a problem but returned enough data to render.
    Partial(ReportPayload, UpstreamNotice),
    Failed(FailureKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The request did not complete, or completed with a non-success status.
    Transport,
    /// The body was not valid JSON.
    MalformedResponse,
    /// The body parsed but lacks the minimum report shape.
    MalformedPayload,
    /// The service reported a problem and returned no renderable data.
    Upstream(UpstreamNotice),
}

/// Map a completed exchange onto its outcome. Non-success statuses are
/// uniform transport failures regardless of body content.
pub fn classify_response(status: u16, body: &str) -> SubmissionOutcome {
    if !(200..300).contains(&status) {
        return SubmissionOutcome::Failed(FailureKind::Transport);
    }

    match ReportPayload::from_json_str(body) {
        Ok(payload) => classify_payload(payload),
        Err(PayloadError::Json(_)) => SubmissionOutcome::Failed(FailureKind::MalformedResponse),
        Err(PayloadError::MissingShape) => SubmissionOutcome::Failed(FailureKind::MalformedPayload),
    }
}

fn classify_payload(payload: ReportPayload) -> SubmissionOutcome {
    match payload.error.as_ref().map(|e| e.notice) {
        None => SubmissionOutcome::Success(payload),
        Some(notice) if payload.has_housing_data() => SubmissionOutcome::Partial(payload, notice),
        Some(notice) => SubmissionOutcome::Failed(FailureKind::Upstream(notice)),
    }
}

/// Advisory copy shown above a partial-success report.
pub fn notice_message(notice: UpstreamNotice) -> &'static str {
    match notice {
        UpstreamNotice::Capacity => {
            "AI analysis is currently unavailable. The extracted data will still be displayed."
        }
        UpstreamNotice::Generic => "Error analyzing the report. Please try again.",
    }
}

/// User-facing copy for terminal failures.
pub fn failure_message(kind: &FailureKind) -> &'static str {
    match kind {
        FailureKind::Transport | FailureKind::MalformedResponse => {
            "Failed to analyze the report. Please try again."
        }
        FailureKind::MalformedPayload => {
            "The analysis service returned an unexpected response. Nothing to display."
        }
        FailureKind::Upstream(UpstreamNotice::Capacity) => {
            "AI analysis is currently unavailable due to service limits. Please try again later."
        }
        FailureKind::Upstream(UpstreamNotice::Generic) => {
            "Error analyzing the report. Please try again."
        }
    }
}

pub fn blocked_message(blocked: SubmitBlocked) -> &'static str {
    match blocked {
        SubmitBlocked::NoFileSelected => "Please select a PDF file.",
        SubmitBlocked::InFlight => "An analysis is already running. Hang tight.",
    }
}
