//! Controllers: one module per admin page.
//!
//! Every submission follows the same shape: refuse if another submission
//! is in flight, validate every field and surface *all* problems at once,
//! then (and only then) touch the stores.  A rejected submission leaves
//! the application state exactly as it found it.

pub mod auth;
pub mod courses;
pub mod student_forms;
pub mod teachers;
pub mod timetable;
pub mod wizard;

use tracing::warn;

use edunova_shared::{Grade, Subject, ValidationError};

use crate::config::ClientConfig;
use crate::events::{Banner, BannerKind, FieldIssue, UiEvent, UiEvents};
use crate::state::AppState;

/// What became of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The stores were mutated.
    Accepted,
    /// Nothing was mutated.
    Rejected,
}

impl SubmitOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

// ----------------------------------------------------------------------
// Banner helpers
// ----------------------------------------------------------------------

pub(crate) fn success(events: &mut impl UiEvents, config: &ClientConfig, text: impl Into<String>) {
    events.emit(UiEvent::Banner(Banner::new(
        BannerKind::Success,
        text,
        config.banner_dismiss,
    )));
}

pub(crate) fn failure(events: &mut impl UiEvents, config: &ClientConfig, text: impl Into<String>) {
    events.emit(UiEvent::Banner(Banner::new(
        BannerKind::Error,
        text,
        config.banner_dismiss,
    )));
}

pub(crate) fn notice(events: &mut impl UiEvents, config: &ClientConfig, text: impl Into<String>) {
    events.emit(UiEvent::Banner(Banner::new(
        BannerKind::Info,
        text,
        config.banner_dismiss,
    )));
}

pub(crate) fn caution(events: &mut impl UiEvents, config: &ClientConfig, text: impl Into<String>) {
    events.emit(UiEvent::Banner(Banner::new(
        BannerKind::Warning,
        text,
        config.banner_dismiss,
    )));
}

// ----------------------------------------------------------------------
// Validation plumbing
// ----------------------------------------------------------------------

/// Turn the full list of validation failures into one [`UiEvent`] plus an
/// error banner carrying the first message.  Focus goes to the first
/// offending field only.
pub(crate) fn reject(
    events: &mut impl UiEvents,
    config: &ClientConfig,
    errors: Vec<ValidationError>,
) -> SubmitOutcome {
    let first_message = errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "Please correct the highlighted fields".to_string());

    let issues: Vec<FieldIssue> = errors
        .iter()
        .enumerate()
        .map(|(i, e)| FieldIssue {
            field: e.field().to_string(),
            message: e.to_string(),
            focus: i == 0,
        })
        .collect();

    events.emit(UiEvent::FieldIssues(issues));
    failure(events, config, first_message);
    SubmitOutcome::Rejected
}

/// Parse a grade slug from a `<select>`-style control.
pub(crate) fn parse_grade(value: &str) -> Result<Grade, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field: "grade" });
    }
    Grade::from_slug(value.trim()).ok_or(ValidationError::Invalid {
        field: "grade",
        reason: "please select a valid grade".to_string(),
    })
}

/// Parse a subject slug from a `<select>`-style control.
pub(crate) fn parse_subject(value: &str) -> Result<Subject, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field: "subject" });
    }
    Subject::from_slug(value.trim()).ok_or(ValidationError::Invalid {
        field: "subject",
        reason: "please select a valid subject".to_string(),
    })
}

// ----------------------------------------------------------------------
// In-flight guard
// ----------------------------------------------------------------------

/// Claim the submission slot.  Returns `false` (and tells the user) when
/// another submission is still in flight.
pub(crate) fn try_begin(
    state: &mut AppState,
    events: &mut impl UiEvents,
    config: &ClientConfig,
) -> bool {
    if state.is_submitting {
        warn!("Submission refused: another one is in flight");
        caution(events, config, "Please wait, a submission is already in progress...");
        return false;
    }
    state.is_submitting = true;
    true
}

pub(crate) fn end_submit(state: &mut AppState) {
    state.is_submitting = false;
}

/// The artificial round-trip the loading spinners are tuned for.
pub(crate) async fn roundtrip(config: &ClientConfig) {
    if !config.simulated_latency.is_zero() {
        tokio::time::sleep(config.simulated_latency).await;
    }
}
