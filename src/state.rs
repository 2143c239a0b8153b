use crate::auth::{AuthEvents, AuthService};
use crate::config::AppConfig;
use crate::db::Database;
use crate::sources::ExternalSource;
use crate::storage::ObjectStore;
use std::sync::Arc;

/// Everything a request handler can reach. Built once in `main` and shared
/// read-only by every worker.
pub struct AppState {
    pub config: AppConfig,
    pub db: Database,
    pub external: Arc<dyn ExternalSource>,
    pub storage: ObjectStore,
    pub auth_events: AuthEvents,
}

impl AppState {
    pub fn new(config: AppConfig, external: Arc<dyn ExternalSource>) -> Self {
        let db = Database::new(config.database_path.clone());
        let storage = ObjectStore::new(config.upload_dir.clone());
        Self {
            config,
            db,
            external,
            storage,
            auth_events: AuthEvents::new(),
        }
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.db, &self.auth_events, self.config.session_ttl_secs)
    }
}
