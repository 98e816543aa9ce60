//! Manage Students page: the Google Form registration link.
//!
//! Only one link is live at a time; every older value stays in the
//! registry, deactivated, so the change history survives.

use serde_json::json;
use tracing::info;

use edunova_shared::{validate, FormLinkId};
use edunova_store::{ExportSnapshot, FormLink};

use crate::config::ClientConfig;
use crate::events::UiEvents;
use crate::state::AppState;

use super::{end_submit, failure, reject, roundtrip, success, try_begin, SubmitOutcome};

/// The live registration link students are sent to, if any.
pub fn current_link(state: &AppState) -> Option<&FormLink> {
    state.form_links.current()
}

/// Validate and register a new form link.  A URL that was ever
/// registered before, active or not, is refused.
pub async fn add_link(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    url: &str,
) -> SubmitOutcome {
    if !try_begin(state, events, config) {
        return SubmitOutcome::Rejected;
    }

    if let Err(e) = validate::form_url(url) {
        end_submit(state);
        return reject(events, config, vec![e]);
    }
    let url = url.trim().to_string();

    if state.form_links.iter().any(|l| l.url == url) {
        end_submit(state);
        failure(events, config, "This Google Form link already exists!");
        return SubmitOutcome::Rejected;
    }

    roundtrip(config).await;

    let outcome = match state.form_links.add(url) {
        Ok(id) => {
            state.activity.record(
                "ADD_FORM_LINK",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "linkId": id }),
            );
            success(
                events,
                config,
                "Google Form link added successfully! Students can now access the registration form.",
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

/// Validate and replace the live link, keeping the old value for audit.
/// Submitting the identical URL is a refused no-op.
pub async fn update_link(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    url: &str,
) -> SubmitOutcome {
    if !try_begin(state, events, config) {
        return SubmitOutcome::Rejected;
    }

    if let Err(e) = validate::form_url(url) {
        end_submit(state);
        return reject(events, config, vec![e]);
    }
    let url = url.trim().to_string();

    let Some(current) = state.form_links.current() else {
        end_submit(state);
        failure(
            events,
            config,
            "No existing link found. Please add a link first using Add Link.",
        );
        return SubmitOutcome::Rejected;
    };
    if current.url == url {
        end_submit(state);
        failure(
            events,
            config,
            "The new link is the same as the current link. No update needed.",
        );
        return SubmitOutcome::Rejected;
    }

    roundtrip(config).await;

    let outcome = match state.form_links.update(url) {
        Ok(id) => {
            state.activity.record(
                "UPDATE_FORM_LINK",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "linkId": id }),
            );
            success(events, config, "Google Form link updated successfully!");
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

/// Retire the link with this id.  Its URL stays reserved so it cannot
/// be re-added by mistake.
pub fn remove_link(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    id: FormLinkId,
) -> SubmitOutcome {
    match state.form_links.deactivate(id) {
        Ok(()) => {
            state.activity.record(
                "REMOVE_FORM_LINK",
                state.current_user.as_deref().unwrap_or("unknown"),
                json!({ "linkId": id }),
            );
            success(events, config, "Google Form link removed successfully!");
            SubmitOutcome::Accepted
        }
        Err(e) => {
            failure(events, config, e.to_string());
            SubmitOutcome::Rejected
        }
    }
}

/// Build the downloadable JSON snapshot of the link registry.
pub fn export_links(state: &mut AppState) -> ExportSnapshot {
    let active: Vec<_> = state.form_links.active().collect();
    let snapshot = ExportSnapshot::build(state.form_links.len(), &active, state.activity.entries());
    info!(total = snapshot.total_records, "Form link registry exported");
    state.activity.record(
        "EXPORT_FORM_LINKS",
        state.current_user.as_deref().unwrap_or("unknown"),
        json!({ "totalRecords": snapshot.total_records }),
    );
    snapshot
}
