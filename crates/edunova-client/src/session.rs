//! Session persistence behind a capability trait.
//!
//! The admin pages remember who is signed in through a handful of string
//! markers.  Markers live in one of two [`Scope`]s: [`Scope::Tab`] vanishes
//! when the tab closes, [`Scope::Persistent`] survives restarts.  The
//! controllers only ever talk to a [`SessionStore`]; the in-memory
//! implementation here backs tests and headless runs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

/// Lifetime of a stored marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Survives application restarts.
    Persistent,
    /// Discarded when the tab (or process) ends.
    Tab,
}

/// Well-known marker keys.
pub mod keys {
    /// Tab-scoped flag set on successful login.
    pub const SESSION: &str = "edunova_session";
    /// Persistent username of the signed-in admin.
    pub const USER: &str = "edunova_user";
    /// Persistent opaque auth token.
    pub const TOKEN: &str = "edunova_token";
    /// Persistent RFC 3339 timestamp of the most recent login.
    pub const LAST_LOGIN: &str = "edunova_last_login";
}

/// Key-value session storage split across two scopes.
pub trait SessionStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String>;
    fn set(&mut self, scope: Scope, key: &str, value: &str);
    fn remove(&mut self, scope: Scope, key: &str);
    /// Drop every marker in the given scope.
    fn clear_scope(&mut self, scope: Scope);
}

/// [`SessionStore`] backed by two hash maps.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    persistent: HashMap<String, String>,
    tab: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, scope: Scope) -> &HashMap<String, String> {
        match scope {
            Scope::Persistent => &self.persistent,
            Scope::Tab => &self.tab,
        }
    }

    fn map_mut(&mut self, scope: Scope) -> &mut HashMap<String, String> {
        match scope {
            Scope::Persistent => &mut self.persistent,
            Scope::Tab => &mut self.tab,
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        self.map(scope).get(key).cloned()
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) {
        self.map_mut(scope).insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, scope: Scope, key: &str) {
        self.map_mut(scope).remove(key);
    }

    fn clear_scope(&mut self, scope: Scope) {
        self.map_mut(scope).clear();
    }
}

/// Whether any recognisable session marker is present.
pub fn has_session(store: &impl SessionStore) -> bool {
    store.get(Scope::Tab, keys::SESSION).is_some()
        || store.get(Scope::Persistent, keys::USER).is_some()
}

/// Record the markers for a freshly authenticated session.
pub fn record_session(store: &mut impl SessionStore, username: &str, token: &str) {
    store.set(Scope::Tab, keys::SESSION, "active");
    store.set(Scope::Persistent, keys::USER, username);
    store.set(Scope::Persistent, keys::TOKEN, token);
    debug!(username, "Session markers recorded");
}

/// Remove every marker a login leaves behind.
pub fn clear_session(store: &mut impl SessionStore) {
    store.clear_scope(Scope::Tab);
    store.remove(Scope::Persistent, keys::USER);
    store.remove(Scope::Persistent, keys::TOKEN);
    debug!("Session markers cleared");
}

/// Stamp the current login time and return a humanised summary of the
/// previous one ("Just now", "5 minutes ago", "3 hours ago").
pub fn touch_last_login(store: &mut impl SessionStore, now: DateTime<Utc>) -> Option<String> {
    let previous = store
        .get(Scope::Persistent, keys::LAST_LOGIN)
        .and_then(|raw| raw.parse::<DateTime<Utc>>().ok())
        .map(|then| describe_elapsed(now, then));

    store.set(Scope::Persistent, keys::LAST_LOGIN, &now.to_rfc3339());
    previous
}

fn describe_elapsed(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes().max(0);
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} minutes ago")
    } else {
        format!("{} hours ago", minutes / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn scopes_do_not_leak_into_each_other() {
        let mut store = MemorySessionStore::new();
        store.set(Scope::Tab, "k", "tab");
        store.set(Scope::Persistent, "k", "disk");

        assert_eq!(store.get(Scope::Tab, "k").as_deref(), Some("tab"));
        assert_eq!(store.get(Scope::Persistent, "k").as_deref(), Some("disk"));

        store.clear_scope(Scope::Tab);
        assert!(store.get(Scope::Tab, "k").is_none());
        assert_eq!(store.get(Scope::Persistent, "k").as_deref(), Some("disk"));
    }

    #[test]
    fn session_round_trip() {
        let mut store = MemorySessionStore::new();
        assert!(!has_session(&store));

        record_session(&mut store, "admin", "tok-123");
        assert!(has_session(&store));

        clear_session(&mut store);
        assert!(!has_session(&store));
        assert!(store.get(Scope::Persistent, keys::TOKEN).is_none());
    }

    #[test]
    fn persistent_user_alone_still_counts_as_session() {
        let mut store = MemorySessionStore::new();
        store.set(Scope::Persistent, keys::USER, "admin");
        assert!(has_session(&store));
    }

    #[test]
    fn last_login_summaries() {
        let mut store = MemorySessionStore::new();
        let now = Utc::now();

        assert_eq!(touch_last_login(&mut store, now), None);
        assert_eq!(
            touch_last_login(&mut store, now + Duration::seconds(30)).as_deref(),
            Some("Just now")
        );

        store.set(Scope::Persistent, keys::LAST_LOGIN, &now.to_rfc3339());
        assert_eq!(
            touch_last_login(&mut store, now + Duration::minutes(5)).as_deref(),
            Some("5 minutes ago")
        );

        store.set(Scope::Persistent, keys::LAST_LOGIN, &now.to_rfc3339());
        assert_eq!(
            touch_last_login(&mut store, now + Duration::hours(3)).as_deref(),
            Some("3 hours ago")
        );
    }
}
