//! Sign-in, account creation, password reset, and the sign-out flow.
//!
//! The client here checks *shape* only (are the fields present and
//! plausible); whether a credential or security key is actually right is
//! decided behind the [`AdminApi`] boundary.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use edunova_shared::{validate, Route, ValidationError};

use crate::api::{AdminApi, LoginRequest, RegisterRequest, ResetPasswordRequest};
use crate::config::ClientConfig;
use crate::events::{UiEvent, UiEvents};
use crate::session::{self, SessionStore};
use crate::state::AppState;

use super::{end_submit, failure, notice, reject, success, try_begin, SubmitOutcome};

// ----------------------------------------------------------------------
// Login
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Submit the login form.  On success the session markers are recorded
/// and the client navigates to the dashboard.
pub async fn login(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    api: &impl AdminApi,
    sessions: &mut impl SessionStore,
    form: LoginForm,
) -> SubmitOutcome {
    if !try_begin(state, events, config) {
        return SubmitOutcome::Rejected;
    }

    let mut errors = Vec::new();
    if form.username.trim().is_empty() {
        errors.push(ValidationError::Required { field: "username" });
    }
    if form.password.is_empty() {
        errors.push(ValidationError::Required { field: "password" });
    }
    if !errors.is_empty() {
        end_submit(state);
        return reject(events, config, errors);
    }

    let result = api
        .login(LoginRequest {
            username: form.username.trim().to_string(),
            password: form.password,
        })
        .await;

    let outcome = match result {
        Ok(auth) => {
            session::record_session(sessions, &auth.username, &auth.token);
            let previous = session::touch_last_login(sessions, Utc::now());
            info!(username = %auth.username, previous_login = ?previous, "Signed in");

            state.current_user = Some(auth.username.clone());
            state.current_page = Route::Dashboard;
            state.activity.record(
                "LOGIN",
                &auth.username,
                json!({ "previousLogin": previous }),
            );

            success(events, config, "Login successful! Redirecting to dashboard...");
            events.emit(UiEvent::Redirect(Route::Dashboard));
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

// ----------------------------------------------------------------------
// Account creation
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub security_key: String,
    pub password: String,
    pub confirm_password: String,
}

fn validate_register(form: &RegisterForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Err(e) = validate::username(&form.username) {
        errors.push(e);
    }
    if let Err(e) = validate::security_key(&form.security_key) {
        errors.push(e);
    }
    if let Err(e) = validate::password(&form.password) {
        errors.push(e);
    }
    if let Err(e) = validate::confirm_password(&form.password, &form.confirm_password) {
        errors.push(e);
    }
    errors
}

/// Submit the create-account form.  The security key is forwarded to the
/// backend; only it knows whether the key is right.
pub async fn register(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    api: &impl AdminApi,
    form: RegisterForm,
) -> SubmitOutcome {
    if !try_begin(state, events, config) {
        return SubmitOutcome::Rejected;
    }

    let errors = validate_register(&form);
    if !errors.is_empty() {
        end_submit(state);
        return reject(events, config, errors);
    }

    let result = api
        .register(RegisterRequest {
            username: form.username.trim().to_string(),
            security_key: form.security_key,
            password: form.password,
        })
        .await;

    let outcome = match result {
        Ok(auth) => {
            info!(username = %auth.username, "Admin account created");
            success(
                events,
                config,
                "Admin account created successfully! Redirecting to login page...",
            );
            events.emit(UiEvent::Redirect(Route::AdminLogin));
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

// ----------------------------------------------------------------------
// Password reset
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetPasswordForm {
    pub email: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Submit the forgot-password form.  The reset flow enforces the strict
/// password rules (length, case, digit, special character).
pub async fn reset_password(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    api: &impl AdminApi,
    form: ResetPasswordForm,
) -> SubmitOutcome {
    if !try_begin(state, events, config) {
        return SubmitOutcome::Rejected;
    }

    let mut errors = Vec::new();
    if let Err(e) = validate::email(&form.email) {
        errors.push(e);
    }
    if let Err(e) = validate::strict_password(&form.new_password) {
        errors.push(e);
    }
    if let Err(e) = validate::confirm_password(&form.new_password, &form.confirm_password) {
        errors.push(e);
    }
    if !errors.is_empty() {
        end_submit(state);
        return reject(events, config, errors);
    }

    let result = api
        .reset_password(ResetPasswordRequest {
            email: form.email.trim().to_string(),
            new_password: form.new_password,
        })
        .await;

    let outcome = match result {
        Ok(()) => {
            success(
                events,
                config,
                "Password reset successfully! You can now login with your new password.",
            );
            events.emit(UiEvent::Redirect(Route::AdminLogin));
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

// ----------------------------------------------------------------------
// Sign-out
// ----------------------------------------------------------------------

/// Where the sign-out conversation stands.
///
/// `Idle -> Confirming -> LoggingOut -> LoggedOut`, with `Confirming`
/// able to fall back to `Idle` when the user cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogoutFlow {
    Idle,
    /// The confirmation dialog is up.
    Confirming,
    /// The backend call is in flight; cancelling is no longer possible.
    LoggingOut,
    /// Terminal: session cleared, client reset.
    LoggedOut,
}

/// Open the sign-out confirmation.  Ignored unless the flow is idle.
pub fn request_logout(state: &mut AppState) {
    if state.logout == LogoutFlow::Idle {
        state.logout = LogoutFlow::Confirming;
    }
}

/// Dismiss the confirmation and stay signed in.
pub fn cancel_logout(state: &mut AppState) {
    if state.logout == LogoutFlow::Confirming {
        state.logout = LogoutFlow::Idle;
    }
}

/// Confirm the sign-out.  Clears every session marker in both scopes,
/// resets the application state, and navigates back to the login page.
pub async fn confirm_logout(
    state: &mut AppState,
    config: &ClientConfig,
    events: &mut impl UiEvents,
    api: &impl AdminApi,
    sessions: &mut impl SessionStore,
) -> SubmitOutcome {
    if state.logout != LogoutFlow::Confirming {
        return SubmitOutcome::Rejected;
    }
    state.logout = LogoutFlow::LoggingOut;

    if let Err(e) = api.logout().await {
        error!(error = %e, "Logout call failed");
        state.logout = LogoutFlow::Confirming;
        failure(
            events,
            config,
            "An error occurred during logout. Please try again.",
        );
        return SubmitOutcome::Rejected;
    }

    session::clear_session(sessions);
    state.reset();
    state.logout = LogoutFlow::LoggedOut;

    success(
        events,
        config,
        "You have been logged out successfully! Redirecting to login page...",
    );
    events.emit(UiEvent::Redirect(Route::AdminLogin));
    SubmitOutcome::Accepted
}

/// Gate for admin pages: when no session marker exists the user is sent
/// back to the login page.
pub fn ensure_session(
    config: &ClientConfig,
    events: &mut impl UiEvents,
    sessions: &impl SessionStore,
) -> bool {
    if session::has_session(sessions) {
        return true;
    }
    notice(
        events,
        config,
        "No active session found. Redirecting to login...",
    );
    events.emit(UiEvent::Redirect(Route::AdminLogin));
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::api::{ApiError, AuthSession, SimulatedApi};
    use crate::events::CollectedEvents;
    use crate::session::MemorySessionStore;

    fn api() -> SimulatedApi {
        SimulatedApi::new(Duration::ZERO, "EDUNOVA2024").with_account("admin", "Passw0rd!")
    }

    /// Backend that refuses everything, for failure paths.
    struct DownApi;

    impl AdminApi for DownApi {
        async fn login(&self, _: LoginRequest) -> Result<AuthSession, ApiError> {
            Err(ApiError::Unavailable("maintenance".into()))
        }
        async fn register(&self, _: RegisterRequest) -> Result<AuthSession, ApiError> {
            Err(ApiError::Unavailable("maintenance".into()))
        }
        async fn reset_password(&self, _: ResetPasswordRequest) -> Result<(), ApiError> {
            Err(ApiError::Unavailable("maintenance".into()))
        }
        async fn logout(&self) -> Result<(), ApiError> {
            Err(ApiError::Unavailable("maintenance".into()))
        }
    }

    #[tokio::test]
    async fn login_records_session_and_redirects() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();
        let mut sessions = MemorySessionStore::new();

        let outcome = login(
            &mut state,
            &config,
            &mut events,
            &api(),
            &mut sessions,
            LoginForm {
                username: "admin".into(),
                password: "Passw0rd!".into(),
            },
        )
        .await;

        assert!(outcome.is_accepted());
        assert!(session::has_session(&sessions));
        assert_eq!(state.current_user.as_deref(), Some("admin"));
        assert_eq!(state.current_page, Route::Dashboard);
        assert_eq!(events.redirect(), Some(&Route::Dashboard));
    }

    #[tokio::test]
    async fn wrong_password_leaves_no_session_behind() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();
        let mut sessions = MemorySessionStore::new();

        let outcome = login(
            &mut state,
            &config,
            &mut events,
            &api(),
            &mut sessions,
            LoginForm {
                username: "admin".into(),
                password: "guess".into(),
            },
        )
        .await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(!session::has_session(&sessions));
        assert!(state.current_user.is_none());
        assert!(events
            .banners()
            .last()
            .unwrap()
            .text
            .contains("Invalid username or password"));
    }

    #[tokio::test]
    async fn register_surfaces_every_invalid_field_at_once() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        let bad = RegisterForm {
            username: "a!".into(),
            security_key: "123".into(),
            password: "short".into(),
            confirm_password: "different".into(),
        };
        let outcome = register(&mut state, &config, &mut events, &api(), bad).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(events.field_issues().len(), 4);
    }

    #[tokio::test]
    async fn register_with_wrong_security_key_is_rejected_by_the_backend() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        // Shape-valid key, wrong value. The client forwards it anyway.
        let form = RegisterForm {
            username: "newadmin".into(),
            security_key: "WRONGKEY".into(),
            password: "Str0ngPass".into(),
            confirm_password: "Str0ngPass".into(),
        };
        let outcome = register(&mut state, &config, &mut events, &api(), form).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(events
            .banners()
            .last()
            .unwrap()
            .text
            .contains("Invalid security key"));
    }

    #[tokio::test]
    async fn reset_password_enforces_strict_rules() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();

        // Valid under the login rules but missing a special character.
        let form = ResetPasswordForm {
            email: "admin@edunova.lk".into(),
            new_password: "Passw0rdd".into(),
            confirm_password: "Passw0rdd".into(),
        };
        let outcome = reset_password(&mut state, &config, &mut events, &api(), form).await;
        assert_eq!(outcome, SubmitOutcome::Rejected);

        let form = ResetPasswordForm {
            email: "admin@edunova.lk".into(),
            new_password: "Passw0rd!".into(),
            confirm_password: "Passw0rd!".into(),
        };
        let outcome = reset_password(&mut state, &config, &mut events, &api(), form).await;
        assert!(outcome.is_accepted());
        assert_eq!(events.redirect(), Some(&Route::AdminLogin));
    }

    #[tokio::test]
    async fn logout_flow_walks_the_state_machine() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();
        let mut sessions = MemorySessionStore::new();

        session::record_session(&mut sessions, "admin", "tok");
        state.current_user = Some("admin".into());

        // Confirming before requesting does nothing.
        assert_eq!(
            confirm_logout(&mut state, &config, &mut events, &api(), &mut sessions).await,
            SubmitOutcome::Rejected
        );

        request_logout(&mut state);
        assert_eq!(state.logout, LogoutFlow::Confirming);

        cancel_logout(&mut state);
        assert_eq!(state.logout, LogoutFlow::Idle);
        assert!(session::has_session(&sessions));

        request_logout(&mut state);
        let outcome =
            confirm_logout(&mut state, &config, &mut events, &api(), &mut sessions).await;

        assert!(outcome.is_accepted());
        assert_eq!(state.logout, LogoutFlow::LoggedOut);
        assert!(!session::has_session(&sessions));
        assert!(state.current_user.is_none());
        assert_eq!(events.redirect(), Some(&Route::AdminLogin));
    }

    #[tokio::test]
    async fn failed_logout_call_returns_to_confirming() {
        let mut state = AppState::new();
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();
        let mut sessions = MemorySessionStore::new();

        session::record_session(&mut sessions, "admin", "tok");
        request_logout(&mut state);

        let outcome =
            confirm_logout(&mut state, &config, &mut events, &DownApi, &mut sessions).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(state.logout, LogoutFlow::Confirming);
        // The session survives a failed sign-out.
        assert!(session::has_session(&sessions));
    }

    #[test]
    fn ensure_session_redirects_when_nothing_is_stored() {
        let config = ClientConfig::instant();
        let mut events = CollectedEvents::new();
        let sessions = MemorySessionStore::new();

        assert!(!ensure_session(&config, &mut events, &sessions));
        assert_eq!(events.redirect(), Some(&Route::AdminLogin));
    }
}
