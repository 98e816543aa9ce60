//! The public materials wizard: pick a subject, then a grade, then the
//! kind of resource, and land on the materials page for that combination.

use serde::{Deserialize, Serialize};

use edunova_shared::{Grade, ResourceKind, Route, Subject};

/// Which panel of the wizard is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Subjects,
    Grades,
    Resources,
}

/// Selection state of the wizard.  Going back a step discards the
/// deeper selections so a stale grade never leaks into a new subject.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    subject: Option<Subject>,
    grade: Option<Grade>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn subject(&self) -> Option<Subject> {
        self.subject
    }

    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    pub fn choose_subject(&mut self, subject: Subject) {
        self.subject = Some(subject);
        self.grade = None;
        self.step = WizardStep::Grades;
    }

    pub fn choose_grade(&mut self, grade: Grade) {
        if self.subject.is_some() {
            self.grade = Some(grade);
            self.step = WizardStep::Resources;
        }
    }

    /// Final step: resolve the selection to the materials page.
    /// `None` until both a subject and a grade are picked.
    pub fn choose_resource(&self, resource: ResourceKind) -> Option<Route> {
        Some(Route::Materials {
            subject: self.subject?,
            grade: self.grade?,
            resource,
        })
    }

    pub fn back_to_subjects(&mut self) {
        self.step = WizardStep::Subjects;
        self.subject = None;
        self.grade = None;
    }

    pub fn back_to_grades(&mut self) {
        if self.subject.is_some() {
            self.step = WizardStep::Grades;
            self.grade = None;
        }
    }
}
