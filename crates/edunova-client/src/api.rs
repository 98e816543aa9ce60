//! The boundary between the client and whatever backend authenticates it.
//!
//! Credential and security-key checks happen behind [`AdminApi`], never in
//! the client: the client validates *shape* (see `edunova_shared::validate`)
//! and the backend decides *correctness*.  [`SimulatedApi`] stands in for a
//! real service during development and tests, complete with the artificial
//! latency the UI's loading states are tuned for.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Login credentials as submitted.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// New-account request. The security key is issued out of band to people
/// allowed to create admin accounts.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub security_key: String,
    pub password: String,
}

/// Password-reset request for an existing account.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// An authenticated session as issued by the backend.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub username: String,
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid security key")]
    InvalidSecurityKey,

    #[error("An account with that username already exists")]
    AccountExists,

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Calls the client makes against the backend.
#[allow(async_fn_in_trait)]
pub trait AdminApi {
    async fn login(&self, request: LoginRequest) -> Result<AuthSession, ApiError>;
    async fn register(&self, request: RegisterRequest) -> Result<AuthSession, ApiError>;
    async fn reset_password(&self, request: ResetPasswordRequest) -> Result<(), ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

/// In-process [`AdminApi`] with configurable latency and a seeded account
/// table.  The security key lives here, on the trusted side of the boundary.
pub struct SimulatedApi {
    latency: Duration,
    security_key: String,
    accounts: Mutex<HashMap<String, String>>,
}

impl SimulatedApi {
    pub fn new(latency: Duration, security_key: impl Into<String>) -> Self {
        Self {
            latency,
            security_key: security_key.into(),
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Seed an account that can log in immediately.
    pub fn with_account(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        {
            let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
            accounts.insert(username.into(), password.into());
        }
        self
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl AdminApi for SimulatedApi {
    async fn login(&self, request: LoginRequest) -> Result<AuthSession, ApiError> {
        self.delay().await;

        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        match accounts.get(&request.username) {
            Some(password) if *password == request.password => {
                info!(username = %request.username, "Login accepted");
                Ok(AuthSession {
                    username: request.username,
                    token: Uuid::new_v4().to_string(),
                })
            }
            _ => Err(ApiError::InvalidCredentials),
        }
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthSession, ApiError> {
        self.delay().await;

        if request.security_key != self.security_key {
            return Err(ApiError::InvalidSecurityKey);
        }

        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        if accounts.contains_key(&request.username) {
            return Err(ApiError::AccountExists);
        }

        accounts.insert(request.username.clone(), request.password);
        info!(username = %request.username, "Admin account registered");
        Ok(AuthSession {
            username: request.username,
            token: Uuid::new_v4().to_string(),
        })
    }

    async fn reset_password(&self, request: ResetPasswordRequest) -> Result<(), ApiError> {
        self.delay().await;

        // The demo backend accepts any well-formed reset without revealing
        // whether the address maps to an account.
        info!(email = %request.email, "Password reset accepted");
        let _ = request.new_password;
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.delay().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> SimulatedApi {
        SimulatedApi::new(Duration::ZERO, "EDUNOVA2024").with_account("admin", "Passw0rd!")
    }

    #[tokio::test]
    async fn login_accepts_seeded_account_only() {
        let api = api();

        let ok = api
            .login(LoginRequest {
                username: "admin".into(),
                password: "Passw0rd!".into(),
            })
            .await;
        assert!(ok.is_ok());

        let bad = api
            .login(LoginRequest {
                username: "admin".into(),
                password: "wrong".into(),
            })
            .await;
        assert!(matches!(bad, Err(ApiError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn register_requires_matching_security_key() {
        let api = api();

        let rejected = api
            .register(RegisterRequest {
                username: "newadmin".into(),
                security_key: "nope".into(),
                password: "Str0ngPass".into(),
            })
            .await;
        assert!(matches!(rejected, Err(ApiError::InvalidSecurityKey)));

        let accepted = api
            .register(RegisterRequest {
                username: "newadmin".into(),
                security_key: "EDUNOVA2024".into(),
                password: "Str0ngPass".into(),
            })
            .await;
        assert!(accepted.is_ok());

        // The new account can log in straight away.
        let login = api
            .login(LoginRequest {
                username: "newadmin".into(),
                password: "Str0ngPass".into(),
            })
            .await;
        assert!(login.is_ok());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let api = api();

        let dup = api
            .register(RegisterRequest {
                username: "admin".into(),
                security_key: "EDUNOVA2024".into(),
                password: "Str0ngPass".into(),
            })
            .await;
        assert!(matches!(dup, Err(ApiError::AccountExists)));
    }
}
