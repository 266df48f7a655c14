use crate::errors::AppError;
use crate::storage::{persist_storage, ClientStorage};
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub const ADMIN_KEY: &str = "admin_logged_in";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Guest,
    Admin,
}

impl SessionState {
    /// Only the literal `"true"` counts as logged in.
    pub fn from_storage(storage: &ClientStorage) -> Self {
        match storage.get(ADMIN_KEY) {
            Some("true") => SessionState::Admin,
            _ => SessionState::Guest,
        }
    }

    pub fn is_admin(self) -> bool {
        self == SessionState::Admin
    }

    pub fn chrome(self) -> Chrome {
        Chrome {
            login_button: !self.is_admin(),
            logout_button: self.is_admin(),
            signup_form: self.is_admin(),
        }
    }
}

/// Which page controls are shown for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chrome {
    pub login_button: bool,
    pub logout_button: bool,
    pub signup_form: bool,
}

/// The in-memory entries only change once the file write has succeeded.
pub async fn login(path: &Path, storage: &mut ClientStorage) -> Result<SessionState, AppError> {
    let mut next = storage.clone();
    next.set(ADMIN_KEY, "true");
    persist_storage(path, &next).await?;
    *storage = next;
    info!("admin session started");
    Ok(SessionState::Admin)
}

pub async fn logout(path: &Path, storage: &mut ClientStorage) -> Result<SessionState, AppError> {
    let mut next = storage.clone();
    next.remove(ADMIN_KEY);
    persist_storage(path, &next).await?;
    *storage = next;
    info!("admin session cleared");
    Ok(SessionState::Guest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{load_storage, scratch_path};

    #[test]
    fn only_literal_true_is_admin() {
        let mut storage = ClientStorage::default();
        assert_eq!(SessionState::from_storage(&storage), SessionState::Guest);

        storage.set(ADMIN_KEY, "TRUE");
        assert_eq!(SessionState::from_storage(&storage), SessionState::Guest);

        storage.set(ADMIN_KEY, "true");
        assert_eq!(SessionState::from_storage(&storage), SessionState::Admin);
    }

    #[test]
    fn chrome_toggles_with_session() {
        let guest = SessionState::Guest.chrome();
        assert!(guest.login_button && !guest.logout_button && !guest.signup_form);

        let admin = SessionState::Admin.chrome();
        assert!(!admin.login_button && admin.logout_button && admin.signup_form);
    }

    #[tokio::test]
    async fn login_survives_reload_and_logout_clears() {
        let path = scratch_path("session");
        let mut storage = ClientStorage::default();

        let state = login(&path, &mut storage).await.unwrap();
        assert_eq!(state, SessionState::Admin);
        let reloaded = load_storage(&path).await;
        assert_eq!(SessionState::from_storage(&reloaded), SessionState::Admin);

        let state = logout(&path, &mut storage).await.unwrap();
        assert_eq!(state, SessionState::Guest);
        let reloaded = load_storage(&path).await;
        assert_eq!(reloaded.get(ADMIN_KEY), None);
        assert_eq!(SessionState::from_storage(&reloaded), SessionState::Guest);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn failed_write_leaves_entries_untouched() {
        let mut path = scratch_path("no_such_dir");
        path.push("client_storage.json");

        let mut storage = ClientStorage::default();
        storage.set(ADMIN_KEY, "true");
        assert!(logout(&path, &mut storage).await.is_err());
        assert_eq!(storage.get(ADMIN_KEY), Some("true"));

        let mut storage = ClientStorage::default();
        assert!(login(&path, &mut storage).await.is_err());
        assert_eq!(storage.get(ADMIN_KEY), None);
    }
}
