use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

/// Handler context: every request reaches storage through this, never a global.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
