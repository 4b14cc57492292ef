//! Process-wide session state
//!
//! Initialized at app start from browser storage, consulted by the shell
//! to decide between login page and application, cleared on logout.

use contracts::system::auth::UserInfo;
use leptos::prelude::*;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "auth_user";

#[derive(Clone, Copy)]
pub struct SessionStore {
    pub token: RwSignal<Option<String>>,
    pub user: RwSignal<Option<UserInfo>>,
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionStore {
    /// Restore a previous session from local storage
    pub fn new() -> Self {
        let storage = local_storage();
        let token = storage
            .as_ref()
            .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten());
        let user = storage
            .as_ref()
            .and_then(|s| s.get_item(USER_KEY).ok().flatten())
            .and_then(|raw| serde_json::from_str::<UserInfo>(&raw).ok());

        Self {
            token: RwSignal::new(token),
            user: RwSignal::new(user),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.get().is_some()
    }

    pub fn username(&self) -> String {
        self.user
            .get()
            .map(|u| u.username)
            .unwrap_or_else(|| "—".to_string())
    }

    pub fn login(&self, token: String, user: UserInfo) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(TOKEN_KEY, &token);
            if let Ok(raw) = serde_json::to_string(&user) {
                let _ = storage.set_item(USER_KEY, &raw);
            }
        }
        self.token.set(Some(token));
        self.user.set(Some(user));
    }

    pub fn logout(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_KEY);
        }
        self.token.set(None);
        self.user.set(None);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience accessor for components
pub fn use_session() -> SessionStore {
    use_context::<SessionStore>().expect("SessionStore not found in context")
}
