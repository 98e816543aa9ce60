//! Application state shared across all controllers.
//!
//! [`AppState`] owns the in-memory records and the handful of runtime
//! flags the controllers coordinate through.  Nothing in here is global:
//! the embedding layer constructs one and hands it to the controllers.

use edunova_shared::Route;
use edunova_store::{ActivityLog, CourseCatalog, FormLinkRegistry, TeacherRoster, Timetable};

use crate::controllers::auth::LogoutFlow;
use crate::controllers::wizard::Wizard;

/// Central application state.
#[derive(Debug)]
pub struct AppState {
    /// Display name of the signed-in admin, if any.
    pub current_user: Option<String>,

    /// Page the client currently shows.
    pub current_page: Route,

    pub teachers: TeacherRoster,
    pub courses: CourseCatalog,
    pub form_links: FormLinkRegistry,
    pub timetable: Timetable,

    /// Audit trail of admin actions, included in exports.
    pub activity: ActivityLog,

    /// Set while a submission is in flight; further submissions are
    /// rejected until it clears.
    pub is_submitting: bool,

    /// Whether the course list panel is expanded.
    pub course_list_visible: bool,

    /// Where the sign-out conversation currently stands.
    pub logout: LogoutFlow,

    /// Public materials wizard (subject, then grade, then resource).
    pub wizard: Wizard,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            current_user: None,
            current_page: Route::Landing,
            teachers: TeacherRoster::new(),
            courses: CourseCatalog::new(),
            form_links: FormLinkRegistry::new(),
            timetable: Timetable::new(),
            activity: ActivityLog::new(),
            is_submitting: false,
            course_list_visible: false,
            logout: LogoutFlow::Idle,
            wizard: Wizard::new(),
        }
    }

    /// Forget everything about the current session.  Records and the
    /// activity log are cleared too; the next sign-in starts fresh.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_returns_to_pristine_state() {
        let mut state = AppState::new();
        state.current_user = Some("admin".into());
        state.current_page = Route::Dashboard;
        state.is_submitting = true;
        state.course_list_visible = true;

        state.reset();

        assert!(state.current_user.is_none());
        assert_eq!(state.current_page, Route::Landing);
        assert!(!state.is_submitting);
        assert!(!state.course_list_visible);
        assert_eq!(state.logout, LogoutFlow::Idle);
    }
}
