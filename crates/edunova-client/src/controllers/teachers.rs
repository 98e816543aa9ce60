//! Manage Teachers page.

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use edunova_shared::{validate, Subject, TeacherId, ValidationError};

use crate::config::ClientConfig;
use crate::events::UiEvents;
use crate::state::AppState;

use super::{
    end_submit, failure, parse_subject, reject, roundtrip, success, try_begin, SubmitOutcome,
};

/// Raw form fields as the page submits them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherForm {
    pub name: String,
    pub subject: String,
    pub contact: String,
    pub email: String,
}

struct ParsedTeacher {
    name: String,
    subject: Subject,
    contact: String,
    email: String,
}

fn validate_form(form: &TeacherForm) -> Result<ParsedTeacher, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.push(ValidationError::Required { field: "name" });
    }

    let subject = match parse_subject(&form.subject) {
        Ok(s) => Some(s),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let contact = match validate::contact_number(&form.contact) {
        Ok(normalised) => Some(normalised),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if let Err(e) = validate::email(&form.email) {
        errors.push(e);
    }

    if errors.is_empty() {
        // The Nones are unreachable once errors is empty.
        match (subject, contact) {
            (Some(subject), Some(contact)) => Ok(ParsedTeacher {
                name: name.to_string(),
                subject,
                contact,
                email: form.email.trim().to_string(),
            }),
            _ => Err(Vec::new()),
        }
    } else {
        Err(errors)
    }
}

/// Validate and add a teacher.  Duplicate emails are refused before the
/// round-trip so the form stays responsive.
pub async fn add_teacher(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    form: TeacherForm,
) -> SubmitOutcome {
    if !try_begin(state, events, config) {
        return SubmitOutcome::Rejected;
    }

    let parsed = match validate_form(&form) {
        Ok(parsed) => parsed,
        Err(errors) => {
            end_submit(state);
            return reject(events, config, errors);
        }
    };

    if state.teachers.find_active_by_email(&parsed.email).is_some() {
        end_submit(state);
        failure(
            events,
            config,
            format!("A teacher with email {} already exists", parsed.email),
        );
        return SubmitOutcome::Rejected;
    }

    roundtrip(config).await;

    let outcome = match state.teachers.add(
        parsed.name.clone(),
        parsed.subject,
        parsed.contact,
        parsed.email.clone(),
    ) {
        Ok(id) => {
            state.activity.record(
                "ADD_TEACHER",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "teacherId": id, "email": parsed.email }),
            );
            success(
                events,
                config,
                format!("Teacher added successfully! {} is now on the roster.", parsed.name),
            );
            SubmitOutcome::Accepted
        }
        Err(e) => {
            failure(events, config, e.to_string());
            SubmitOutcome::Rejected
        }
    };

    end_submit(state);
    outcome
}

/// Validate and update the active teacher keyed by email.
pub async fn update_teacher(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    form: TeacherForm,
) -> SubmitOutcome {
    if !try_begin(state, events, config) {
        return SubmitOutcome::Rejected;
    }

    let parsed = match validate_form(&form) {
        Ok(parsed) => parsed,
        Err(errors) => {
            end_submit(state);
            return reject(events, config, errors);
        }
    };

    if state.teachers.find_active_by_email(&parsed.email).is_none() {
        end_submit(state);
        failure(
            events,
            config,
            "No teacher found with that email. Use Add Teacher instead.",
        );
        return SubmitOutcome::Rejected;
    }

    roundtrip(config).await;

    let outcome = match state.teachers.update_by_email(
        &parsed.email,
        parsed.name,
        parsed.subject,
        parsed.contact,
    ) {
        Ok(id) => {
            state.activity.record(
                "UPDATE_TEACHER",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "teacherId": id, "email": parsed.email }),
            );
            success(events, config, "Teacher updated successfully!");
            SubmitOutcome::Accepted
        }
        Err(e) => {
            failure(events, config, e.to_string());
            SubmitOutcome::Rejected
        }
    };

    end_submit(state);
    outcome
}

/// The roster rows the Manage Teachers table shows.
pub fn active_teachers(state: &AppState) -> Vec<&edunova_store::Teacher> {
    state.teachers.active().collect()
}

/// Soft-delete a teacher.  The record stays in the roster for audit.
pub fn remove_teacher(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    id: TeacherId,
) -> SubmitOutcome {
    match state.teachers.deactivate(id) {
        Ok(()) => {
            info!(teacher_id = %id, "Teacher deactivated");
            state.activity.record(
                "REMOVE_TEACHER",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "teacherId": id }),
            );
            success(events, config, "Teacher removed successfully!");
            SubmitOutcome::Accepted
        }
        Err(e) => {
            failure(events, config, e.to_string());
            SubmitOutcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectedEvents;

    fn form() -> TeacherForm {
        TeacherForm {
            name: "Nadeesha Perera".into(),
            subject: "mathematics".into(),
            contact: "077-123-4567".into(),
            email: "nadeesha@edunova.lk".into(),
        }
    }

    #[tokio::test]
    async fn add_teacher_happy_path() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        let outcome = add_teacher(&mut state, &config, &mut events, form()).await;

        assert!(outcome.is_accepted());
        assert_eq!(state.teachers.active().count(), 1);
        assert_eq!(state.activity.len(), 1);
        assert!(!state.is_submitting);
        assert!(events.banners()[0].text.contains("Teacher added successfully"));
        // Contact normalised to bare digits.
        let teacher = state.teachers.iter().next().unwrap();
        assert_eq!(teacher.contact, "0771234567");
    }

    #[tokio::test]
    async fn all_invalid_form_reports_every_field_and_mutates_nothing() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        let bad = TeacherForm {
            name: "  ".into(),
            subject: "".into(),
            contact: "123".into(),
            email: "not-an-email".into(),
        };
        let outcome = add_teacher(&mut state, &config, &mut events, bad).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        let issues = events.field_issues();
        assert_eq!(issues.len(), 4);
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, ["name", "subject", "contact number", "email"]);
        // Only the first issue takes focus.
        assert!(issues[0].focus);
        assert!(issues[1..].iter().all(|i| !i.focus));
        assert!(state.teachers.is_empty());
        assert!(state.activity.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_refused() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        add_teacher(&mut state, &config, &mut events, form()).await;
        let outcome = add_teacher(&mut state, &config, &mut events, form()).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(state.teachers.len(), 1);
        assert!(events
            .banners()
            .last()
            .unwrap()
            .text
            .contains("already exists"));
    }

    #[tokio::test]
    async fn in_flight_guard_refuses_reentry() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        state.is_submitting = true;
        let outcome = add_teacher(&mut state, &config, &mut events, form()).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(state.teachers.is_empty());
        assert!(events.banners()[0].text.contains("already in progress"));
        // The guard does not clear a flag it never set.
        assert!(state.is_submitting);
    }

    #[tokio::test]
    async fn update_requires_existing_active_teacher() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        let outcome = update_teacher(&mut state, &config, &mut events, form()).await;
        assert_eq!(outcome, SubmitOutcome::Rejected);

        add_teacher(&mut state, &config, &mut events, form()).await;
        let mut updated = form();
        updated.name = "N. Perera".into();
        let outcome = update_teacher(&mut state, &config, &mut events, updated).await;
        assert!(outcome.is_accepted());
        assert_eq!(state.teachers.iter().next().unwrap().name, "N. Perera");
    }

    #[tokio::test]
    async fn remove_keeps_record_for_audit() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        add_teacher(&mut state, &config, &mut events, form()).await;
        let id = state.teachers.iter().next().unwrap().id;

        let outcome = remove_teacher(&mut state, &config, &mut events, id);
        assert!(outcome.is_accepted());
        assert_eq!(state.teachers.len(), 1);
        assert_eq!(state.teachers.active().count(), 0);
    }
}
