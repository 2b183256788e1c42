use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::cache::ResultCache;
use crate::config::settings::AppConfig;
use crate::database::{self, SqliteRepository};
use crate::services::scoring::ScoringService;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let pool = database::create_pool(&self.config.database_path)?;
        {
            let mut conn = database::get_connection(&pool)?;
            if !database::setup::has_schema(&mut conn)? {
                database::setup::reset_schema(&mut conn)?;
            }
        }

        let cache = ResultCache::new(&self.config.cache_dir)?;
        let state = Arc::new(AppState {
            service: ScoringService::new(SqliteRepository::new(pool), Some(cache)),
            admin_token: self.config.admin_token.clone(),
        });

        let app = create_router(state)
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {} (database {})", addr, self.config.database_path);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
