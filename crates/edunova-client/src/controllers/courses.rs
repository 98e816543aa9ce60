//! Manage Courses page.

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use edunova_shared::{validate, CourseId, Grade, Subject, ValidationError};
use edunova_store::{CatalogStats, ExportSnapshot};

use crate::config::ClientConfig;
use crate::events::UiEvents;
use crate::state::AppState;

use super::{
    end_submit, failure, notice, parse_grade, parse_subject, reject, roundtrip, success,
    try_begin, SubmitOutcome,
};

/// Raw form fields as the page submits them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseForm {
    pub grade: String,
    pub subject: String,
    pub drive_link: String,
}

fn validate_form(form: &CourseForm) -> Result<(Grade, Subject, String), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let grade = match parse_grade(&form.grade) {
        Ok(g) => Some(g),
        Err(e) => {
            errors.push(e);
            None
        }
    };
    let subject = match parse_subject(&form.subject) {
        Ok(s) => Some(s),
        Err(e) => {
            errors.push(e);
            None
        }
    };
    if let Err(e) = validate::drive_url(&form.drive_link) {
        errors.push(e);
    }

    match (grade, subject, errors.is_empty()) {
        (Some(grade), Some(subject), true) => {
            Ok((grade, subject, form.drive_link.trim().to_string()))
        }
        _ => Err(errors),
    }
}

fn actor(state: &AppState) -> String {
    state
        .current_user
        .clone()
        .unwrap_or_else(|| "unknown".to_string())
}

/// Validate and add a course.  An active course for the same grade and
/// subject is refused before the round-trip.
pub async fn add_course(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    form: CourseForm,
) -> SubmitOutcome {
    if !try_begin(state, events, config) {
        return SubmitOutcome::Rejected;
    }

    let (grade, subject, drive_link) = match validate_form(&form) {
        Ok(parsed) => parsed,
        Err(errors) => {
            end_submit(state);
            return reject(events, config, errors);
        }
    };

    if state.courses.find(grade, subject).is_some() {
        end_submit(state);
        failure(
            events,
            config,
            format!("A course for {grade} - {subject} already exists! Use Update Course instead."),
        );
        return SubmitOutcome::Rejected;
    }

    roundtrip(config).await;

    let by = actor(state);
    let outcome = match state.courses.add(grade, subject, drive_link, by) {
        Ok(id) => {
            state.activity.record(
                "ADD_COURSE",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "courseId": id, "grade": grade, "subject": subject }),
            );
            success(
                events,
                config,
                format!("Course added successfully! {grade} - {subject} is now available."),
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

/// Validate and replace the drive link of an existing active course,
/// keeping the previous link for audit display.
pub async fn update_course(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    form: CourseForm,
) -> SubmitOutcome {
    if !try_begin(state, events, config) {
        return SubmitOutcome::Rejected;
    }

    let (grade, subject, drive_link) = match validate_form(&form) {
        Ok(parsed) => parsed,
        Err(errors) => {
            end_submit(state);
            return reject(events, config, errors);
        }
    };

    if state.courses.find(grade, subject).is_none() {
        end_submit(state);
        failure(
            events,
            config,
            format!("No existing course found for {grade} - {subject}. Use Add Course instead."),
        );
        return SubmitOutcome::Rejected;
    }

    roundtrip(config).await;

    let by = actor(state);
    let outcome = match state.courses.update(grade, subject, drive_link, by) {
        Ok(id) => {
            state.activity.record(
                "UPDATE_COURSE",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "courseId": id, "grade": grade, "subject": subject }),
            );
            success(
                events,
                config,
                format!("Course updated successfully! {grade} - {subject} now points at the new materials."),
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

/// Soft-delete a course.  The record stays in the catalog for audit.
pub fn remove_course(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    id: CourseId,
) -> SubmitOutcome {
    match state.courses.deactivate(id) {
        Ok(()) => {
            info!(course_id = %id, "Course deactivated");
            state.activity.record(
                "REMOVE_COURSE",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "courseId": id }),
            );
            success(events, config, "Course removed successfully!");
            SubmitOutcome::Accepted
        }
        Err(e) => {
            failure(events, config, e.to_string());
            SubmitOutcome::Rejected
        }
    }
}

/// Flip the course list panel and tell the user what happened.
/// Returns the new visibility.
pub fn toggle_course_list(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
) -> bool {
    state.course_list_visible = !state.course_list_visible;
    if state.course_list_visible {
        notice(events, config, "Displaying all uploaded courses.");
    } else {
        notice(events, config, "Courses list hidden.");
    }
    state.course_list_visible
}

/// Called when the admin picks a grade and subject in the form: if an
/// active course already exists its link is returned for prefill.
pub fn select_class(
    state: &AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    grade: &str,
    subject: &str,
) -> Option<String> {
    let (grade, subject) = (parse_grade(grade).ok()?, parse_subject(subject).ok()?);
    let course = state.courses.find(grade, subject)?;
    notice(
        events,
        config,
        format!("Found existing course: {grade} - {subject}. Submitting will update it."),
    );
    Some(course.drive_link.clone())
}

/// Catalog statistics for the dashboard cards.
pub fn course_stats(state: &AppState) -> CatalogStats {
    state.courses.stats()
}

/// Build the downloadable JSON snapshot of the catalog.
pub fn export_courses(state: &mut AppState) -> ExportSnapshot {
    let active: Vec<_> = state.courses.active().collect();
    let snapshot = ExportSnapshot::build(state.courses.len(), &active, state.activity.entries());
    state.activity.record(
        "EXPORT_COURSES_DATA",
        state.current_user.as_deref().unwrap_or("unknown"),
        json!({ "totalRecords": snapshot.total_records }),
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectedEvents;

    fn form() -> CourseForm {
        CourseForm {
            grade: "grade-9".into(),
            subject: "computer-science".into(),
            drive_link: "https://drive.google.com/drive/folders/1AbC_dEf".into(),
        }
    }

    #[tokio::test]
    async fn add_then_duplicate_is_refused() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        assert!(add_course(&mut state, &config, &mut events, form())
            .await
            .is_accepted());

        let dup = CourseForm {
            drive_link: "https://docs.google.com/document/d/other".into(),
            ..form()
        };
        let outcome = add_course(&mut state, &config, &mut events, dup).await;
        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(state.courses.len(), 1);
        assert!(events
            .banners()
            .last()
            .unwrap()
            .text
            .contains("Use Update Course instead"));
    }

    #[tokio::test]
    async fn all_invalid_form_reports_every_field() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        let bad = CourseForm {
            grade: "grade-13".into(),
            subject: "alchemy".into(),
            drive_link: "http://example.com/not-drive".into(),
        };
        let outcome = add_course(&mut state, &config, &mut events, bad).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(events.field_issues().len(), 3);
        assert!(state.courses.is_empty());
        assert!(state.activity.is_empty());
    }

    #[tokio::test]
    async fn update_stashes_previous_link() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        add_course(&mut state, &config, &mut events, form()).await;

        let updated = CourseForm {
            drive_link: "https://docs.google.com/spreadsheets/d/xYz9".into(),
            ..form()
        };
        assert!(update_course(&mut state, &config, &mut events, updated)
            .await
            .is_accepted());

        let course = state.courses.iter().next().unwrap();
        assert_eq!(
            course.drive_link,
            "https://docs.google.com/spreadsheets/d/xYz9"
        );
        assert_eq!(
            course.previous_drive_link.as_deref(),
            Some("https://drive.google.com/drive/folders/1AbC_dEf")
        );
    }

    #[tokio::test]
    async fn update_without_existing_course_is_refused() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        let outcome = update_course(&mut state, &config, &mut events, form()).await;
        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(events
            .banners()
            .last()
            .unwrap()
            .text
            .contains("Use Add Course instead"));
    }

    #[tokio::test]
    async fn select_class_prefills_existing_link() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        add_course(&mut state, &config, &mut events, form()).await;

        let link = select_class(
            &state,
            &config,
            &mut events,
            "grade-9",
            "computer-science",
        );
        assert_eq!(
            link.as_deref(),
            Some("https://drive.google.com/drive/folders/1AbC_dEf")
        );

        assert!(select_class(&state, &config, &mut events, "grade-4", "art").is_none());
    }

    #[test]
    fn toggle_flips_and_announces() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        assert!(toggle_course_list(&mut state, &config, &mut events));
        assert!(!toggle_course_list(&mut state, &config, &mut events));
        assert_eq!(events.banners().len(), 2);
    }

    #[tokio::test]
    async fn export_includes_active_records_and_logs_itself() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        add_course(&mut state, &config, &mut events, form()).await;
        let snapshot = export_courses(&mut state);

        assert_eq!(snapshot.total_records, 1);
        assert_eq!(state.activity.len(), 2); // ADD_COURSE + EXPORT_COURSES_DATA
        assert!(snapshot.to_json().contains("computer-science"));
    }
}
