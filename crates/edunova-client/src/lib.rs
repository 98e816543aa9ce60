//! EduNova admin client runtime.
//!
//! Everything the admin pages do, minus the rendering: [`state::AppState`]
//! holds the records and flags, the [`controllers`] mutate it in response
//! to form submissions, the [`api::AdminApi`] trait marks the trusted
//! boundary where credentials are actually checked, and [`events`] carries
//! banners, field issues, and redirects back to whatever draws the screen.

pub mod api;
pub mod config;
pub mod controllers;
pub mod events;
pub mod session;
pub mod state;

pub use api::{AdminApi, ApiError, AuthSession, SimulatedApi};
pub use config::{init_tracing, ClientConfig};
pub use controllers::SubmitOutcome;
pub use events::{Banner, BannerKind, CollectedEvents, FieldIssue, UiEvent, UiEvents};
pub use session::{MemorySessionStore, Scope, SessionStore};
pub use state::AppState;
