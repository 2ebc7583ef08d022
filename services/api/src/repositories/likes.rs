//! Liked hostels of the logged-in user
//!
//! The backend decides what is liked. The copy kept in storage is refreshed
//! after every successful call and never read back as truth.

use auth::SessionManager;
use common::Backend;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::middleware::require_login;
use crate::models::HostelRecord;

use super::{list_field, wire_id};

/// Like repository
#[derive(Clone)]
pub struct LikeRepository {
    backend: Backend,
    session: SessionManager,
}

impl LikeRepository {
    pub fn new(backend: Backend, session: SessionManager) -> Self {
        Self { backend, session }
    }

    /// Full records of the liked hostels
    pub async fn liked_hostels(&self) -> ApiResult<Vec<HostelRecord>> {
        let token = require_login(&self.session).await?;

        let value = self
            .backend
            .get("/hostel/liked-hostels", &[], Some(&token))
            .await?;
        let records = HostelRecord::list_from(list_field(&value, &["data", "hostels"]));

        let ids: Vec<String> = records.iter().filter_map(|r| r.id.clone()).collect();
        self.mirror(&ids).await;

        Ok(records)
    }

    /// Ids of the liked hostels
    pub async fn liked_ids(&self) -> ApiResult<Vec<String>> {
        let records = self.liked_hostels().await?;
        Ok(records.into_iter().filter_map(|r| r.id).collect())
    }

    /// Flip the like on a hostel; returns whether it is now liked
    ///
    /// Fails with `LoginRequired` before any request when logged out.
    pub async fn toggle(&self, hostel_id: &str) -> ApiResult<bool> {
        let token = require_login(&self.session).await?;
        let hostel_id = hostel_id.trim();

        let value = self
            .backend
            .post_json(
                "/hostel/like-hostel",
                json!({"hostel_id": wire_id(hostel_id)}),
                Some(&token),
            )
            .await?;
        let liked = value.get("liked").and_then(Value::as_bool).unwrap_or(false);
        info!("Hostel {} liked: {}", hostel_id, liked);

        let mut ids = self.session.liked_cache().await?;
        ids.retain(|id| id != hostel_id);
        if liked {
            ids.push(hostel_id.to_string());
        }
        self.mirror(&ids).await;

        Ok(liked)
    }

    /// Ids from the advisory cache, for display before the first fetch
    pub async fn cached_ids(&self) -> ApiResult<Vec<String>> {
        Ok(self.session.liked_cache().await?)
    }

    async fn mirror(&self, ids: &[String]) {
        if let Err(e) = self.session.set_liked_cache(ids).await {
            warn!("Could not update the liked cache: {}", e);
        }
    }
}
