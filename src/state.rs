use std::sync::Arc;

use schoolhub_config::{CorsConfig, ServerConfig};
use sqlx::PgPool;

use crate::modules::reports::{PgReportStore, ReportStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub report_store: Arc<dyn ReportStore>,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    /// Reports read through Postgres using the same pool.
    pub fn new(db: PgPool, cors_config: CorsConfig, server_config: ServerConfig) -> Self {
        Self {
            report_store: Arc::new(PgReportStore::new(db.clone())),
            db,
            cors_config,
            server_config,
        }
    }

    /// Swaps the source reports are read from.
    pub fn with_report_store(mut self, store: Arc<dyn ReportStore>) -> Self {
        self.report_store = store;
        self
    }
}
