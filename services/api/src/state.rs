//! Client state shared across views

use auth::{AuthClient, SessionManager};
use common::{Backend, ClientConfig, FileStorage, HttpClient, Normalizers, Storage};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::repositories::{
    BookingRepository, DashboardRepository, FoodMenuRepository, HostelRepository, LikeRepository,
};

/// Client state shared across views
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub session: SessionManager,
    pub auth: AuthClient,
    pub normalizers: Normalizers,
    pub hostels: HostelRepository,
    pub menus: FoodMenuRepository,
    pub likes: LikeRepository,
    pub bookings: BookingRepository,
    pub dashboard: DashboardRepository,
}

impl AppState {
    /// Wire every component over the given transport and storage
    pub fn new(config: ClientConfig, http: Arc<dyn HttpClient>, storage: Arc<dyn Storage>) -> Self {
        let backend = Backend::new(http, &config.api_base_url, config.retry_delay());
        let session = SessionManager::new(storage);

        Self {
            auth: AuthClient::new(
                backend.clone(),
                session.clone(),
                &config.google_userinfo_url,
            ),
            normalizers: Normalizers::from_config(&config),
            hostels: HostelRepository::new(backend.clone(), session.clone()),
            menus: FoodMenuRepository::new(backend.clone()),
            likes: LikeRepository::new(backend.clone(), session.clone()),
            bookings: BookingRepository::new(backend.clone(), session.clone()),
            dashboard: DashboardRepository::new(backend, session.clone()),
            session,
            config,
        }
    }

    /// Production wiring: reqwest transport and file-backed storage
    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        let backend = Backend::from_config(&config)?;
        let storage = FileStorage::new(&config.storage_path);

        info!(
            "Client ready (backend: {}, storage: {})",
            config.api_base_url,
            storage.path().display()
        );
        Ok(Self::new(config, backend.http(), Arc::new(storage)))
    }
}
