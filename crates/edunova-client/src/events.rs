//! Events the controllers emit towards the presentation layer.
//!
//! Controllers never touch widgets directly; they push [`UiEvent`]s into a
//! [`UiEvents`] sink and the rendering layer decides how to show them.

use std::time::Duration;

use serde::Serialize;

use edunova_shared::Route;

/// Visual flavour of a banner notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
    Info,
    Warning,
}

/// A transient notification banner.
#[derive(Debug, Clone, Serialize)]
pub struct Banner {
    pub text: String,
    pub kind: BannerKind,
    /// How long the banner stays visible before auto-dismissing.
    pub dismiss_after: Duration,
}

impl Banner {
    pub fn new(kind: BannerKind, text: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            text: text.into(),
            kind,
            dismiss_after,
        }
    }
}

/// A per-field validation problem attached to a form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Form field the issue belongs to (e.g. `"email"`).
    pub field: String,
    pub message: String,
    /// Whether the rendering layer should move focus to this field.
    /// Only the first issue of a rejected submission carries focus.
    pub focus: bool,
}

/// Everything a controller can ask the presentation layer to do.
#[derive(Debug, Clone, Serialize)]
pub enum UiEvent {
    Banner(Banner),
    FieldIssues(Vec<FieldIssue>),
    Redirect(Route),
}

/// Sink for controller output.
pub trait UiEvents {
    fn emit(&mut self, event: UiEvent);
}

/// Event sink that records everything, used in tests and headless runs.
#[derive(Debug, Default)]
pub struct CollectedEvents {
    pub events: Vec<UiEvent>,
}

impl CollectedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// All banners emitted so far, in order.
    pub fn banners(&self) -> Vec<&Banner> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Banner(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    /// All field issues emitted so far, flattened.
    pub fn field_issues(&self) -> Vec<&FieldIssue> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::FieldIssues(issues) => Some(issues.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// The last redirect requested, if any.
    pub fn redirect(&self) -> Option<&Route> {
        self.events.iter().rev().find_map(|e| match e {
            UiEvent::Redirect(route) => Some(route),
            _ => None,
        })
    }
}

impl UiEvents for CollectedEvents {
    fn emit(&mut self, event: UiEvent) {
        self.events.push(event);
    }
}
