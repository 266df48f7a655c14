use crate::api::ApiClient;
use crate::render::ActivityListView;
use crate::session::SessionState;
use crate::storage::ClientStorage;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub storage_path: PathBuf,
    pub storage: Arc<Mutex<ClientStorage>>,
    pub session: Arc<Mutex<SessionState>>,
    /// Last rendered activity list, shown again when an action fails. `None` until the first fetch.
    pub snapshot: Arc<Mutex<Option<ActivityListView>>>,
}

impl AppState {
    pub fn new(api: ApiClient, storage_path: PathBuf, storage: ClientStorage) -> Self {
        let session = SessionState::from_storage(&storage);
        Self {
            api,
            storage_path,
            storage: Arc::new(Mutex::new(storage)),
            session: Arc::new(Mutex::new(session)),
            snapshot: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn session(&self) -> SessionState {
        *self.session.lock().await
    }
}
