//! Manage Timetable page.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use edunova_shared::{SlotId, ValidationError};
use edunova_store::{ClassKey, DaySchedule};

use crate::config::ClientConfig;
use crate::events::UiEvents;
use crate::state::AppState;

use super::{
    end_submit, failure, parse_grade, parse_subject, reject, roundtrip, success, try_begin,
    SubmitOutcome,
};

/// Raw form fields as the page submits them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotForm {
    pub grade: String,
    pub subject: String,
    /// `YYYY-MM-DD`, as an `<input type="date">` produces.
    pub date: String,
    /// `HH:MM`, as an `<input type="time">` produces.
    pub start: String,
    pub end: String,
}

struct ParsedSlot {
    key: ClassKey,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field: "date" });
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::Invalid {
        field: "date",
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ValidationError::Invalid {
        field,
        reason: "expected HH:MM".to_string(),
    })
}

fn validate_form(form: &SlotForm) -> Result<ParsedSlot, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let grade = parse_grade(&form.grade).map_err(|e| errors.push(e)).ok();
    let subject = parse_subject(&form.subject).map_err(|e| errors.push(e)).ok();
    let date = parse_date(&form.date).map_err(|e| errors.push(e)).ok();
    let start = parse_time("start time", &form.start)
        .map_err(|e| errors.push(e))
        .ok();
    let end = parse_time("end time", &form.end)
        .map_err(|e| errors.push(e))
        .ok();

    match (grade, subject, date, start, end, errors.is_empty()) {
        (Some(grade), Some(subject), Some(date), Some(start), Some(end), true) => Ok(ParsedSlot {
            key: ClassKey { grade, subject },
            date,
            start,
            end,
        }),
        _ => Err(errors),
    }
}

/// Validate and add a timetable slot for one class.
pub async fn add_slot(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    form: SlotForm,
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

    roundtrip(config).await;

    let outcome = match state
        .timetable
        .add(parsed.key, parsed.date, parsed.start, parsed.end)
    {
        Ok(id) => {
            state.activity.record(
                "ADD_TIMETABLE_SLOT",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({
                    "slotId": id,
                    "grade": parsed.key.grade,
                    "subject": parsed.key.subject,
                    "date": parsed.date,
                }),
            );
            success(events, config, "Timetable slot added successfully!");
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

/// The active schedule of one class, grouped by date with each day's
/// slots in start-time order.
pub fn class_schedule(state: &AppState, grade: &str, subject: &str) -> Vec<DaySchedule> {
    match (parse_grade(grade), parse_subject(subject)) {
        (Ok(grade), Ok(subject)) => state.timetable.schedule(ClassKey { grade, subject }),
        _ => Vec::new(),
    }
}

/// Soft-delete one slot.
pub fn remove_slot(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    key: ClassKey,
    id: SlotId,
) -> SubmitOutcome {
    match state.timetable.deactivate(key, id) {
        Ok(()) => {
            info!(slot_id = %id, "Timetable slot deactivated");
            state.activity.record(
                "REMOVE_TIMETABLE_SLOT",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "slotId": id }),
            );
            success(events, config, "Timetable slot removed successfully!");
            SubmitOutcome::Accepted
        }
        Err(e) => {
            failure(events, config, e.to_string());
            SubmitOutcome::Rejected
        }
    }
}

/// Soft-delete every active slot a class has on one date.
pub fn remove_date(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    key: ClassKey,
    date: NaiveDate,
) -> SubmitOutcome {
    match state.timetable.deactivate_date(key, date) {
        Ok(count) => {
            state.activity.record(
                "REMOVE_TIMETABLE_DATE",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "date": date, "slotsRemoved": count }),
            );
            success(
                events,
                config,
                format!("Removed {count} slot(s) scheduled for {date}."),
            );
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

    fn form(date: &str, start: &str, end: &str) -> SlotForm {
        SlotForm {
            grade: "grade-7".into(),
            subject: "physics".into(),
            date: date.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    #[tokio::test]
    async fn schedule_groups_by_date_and_orders_by_start() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        // Inserted out of order on purpose.
        add_slot(&mut state, &config, &mut events, form("2024-03-12", "13:00", "14:00")).await;
        add_slot(&mut state, &config, &mut events, form("2024-03-11", "10:00", "11:00")).await;
        add_slot(&mut state, &config, &mut events, form("2024-03-11", "08:00", "09:00")).await;

        let days = class_schedule(&state, "grade-7", "physics");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date.to_string(), "2024-03-11");
        assert_eq!(days[0].slots[0].start.to_string(), "08:00:00");
        assert_eq!(days[0].slots[1].start.to_string(), "10:00:00");
        assert_eq!(days[1].date.to_string(), "2024-03-12");
    }

    #[tokio::test]
    async fn inverted_time_range_is_refused() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        let outcome =
            add_slot(&mut state, &config, &mut events, form("2024-03-11", "14:00", "13:00")).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(state.timetable.is_empty());
        assert!(events
            .banners()
            .last()
            .unwrap()
            .text
            .contains("end time must be after"));
    }

    #[tokio::test]
    async fn missing_fields_report_each_one() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        let outcome = add_slot(&mut state, &config, &mut events, SlotForm::default()).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(events.field_issues().len(), 5);
    }

    #[tokio::test]
    async fn remove_date_clears_every_slot_on_that_day() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        add_slot(&mut state, &config, &mut events, form("2024-03-11", "08:00", "09:00")).await;
        add_slot(&mut state, &config, &mut events, form("2024-03-11", "10:00", "11:00")).await;
        add_slot(&mut state, &config, &mut events, form("2024-03-12", "08:00", "09:00")).await;

        let key = ClassKey {
            grade: edunova_shared::Grade::new(7).unwrap(),
            subject: edunova_shared::Subject::Physics,
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let outcome = remove_date(&mut state, &config, &mut events, key, date);

        assert!(outcome.is_accepted());
        let days = class_schedule(&state, "grade-7", "physics");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date.to_string(), "2024-03-12");

        // A second pass finds nothing left to remove.
        let outcome = remove_date(&mut state, &config, &mut events, key, date);
        assert_eq!(outcome, SubmitOutcome::Rejected);
    }
}
