pub mod admin;
pub mod cli;
pub mod config;
pub mod error;
pub mod menu;
pub mod models;
pub mod services;
pub mod wizard;

use chrono::Duration;

use crate::error::ApiResult;
use crate::services::ApiClient;

// Shared state for the whole front end
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::Config,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: config::Config) -> ApiResult<Self> {
        let api = ApiClient::from_config(&config.api)?;
        Ok(Self { config, api })
    }

    /// Lifetime of a credential whose expiry is not known. Settings outside
    /// the accepted range are clamped into it.
    pub fn session_ttl(&self) -> Duration {
        let minutes = self
            .config
            .session
            .idle_timeout_minutes
            .clamp(1, config::MAX_IDLE_TIMEOUT_MINUTES);
        Duration::try_minutes(minutes).unwrap_or(Duration::minutes(60))
    }
}
