//! Hostel list, detail, owner listings and uploads

use auth::SessionManager;
use common::Backend;
use common::normalize::display_text;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::middleware::{require_login, require_owner};
use crate::models::{HostelRecord, NewHostel};

use super::{field_or_root, list_field};

/// Hostel repository
#[derive(Clone)]
pub struct HostelRepository {
    backend: Backend,
    session: SessionManager,
}

impl HostelRepository {
    /// Create a new hostel repository
    pub fn new(backend: Backend, session: SessionManager) -> Self {
        Self { backend, session }
    }

    /// All hostels, optionally narrowed server-side to a city
    pub async fn list(&self, city: Option<&str>) -> ApiResult<Vec<HostelRecord>> {
        let city = city.map(str::trim).filter(|city| !city.is_empty());
        let query: Vec<(&str, &str)> = city.map(|city| ("city", city)).into_iter().collect();

        let value = self
            .backend
            .get("/hostel/gethostels", &query, None)
            .await?;
        let records = HostelRecord::list_from(list_field(&value, &["hostels", "data"]));

        info!("Fetched {} hostels (city: {:?})", records.len(), city);
        Ok(records)
    }

    /// One hostel by id
    pub async fn find(&self, id: &str) -> ApiResult<HostelRecord> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::BadRequest("Hostel id is required".to_string()));
        }

        let value = self
            .backend
            .get(&format!("/hostel/{}", id), &[], None)
            .await?;

        HostelRecord::from_value(field_or_root(&value, "data"))
            .filter(|record| record.id.is_some() || record.name.is_some())
            .ok_or_else(|| ApiError::NotFound(format!("hostel {}", id)))
    }

    /// PGs listed by the logged-in owner
    pub async fn owner_pgs(&self) -> ApiResult<Vec<HostelRecord>> {
        let token = require_login(&self.session).await?;

        let value = self
            .backend
            .get("/hostel/owner/pgs", &[], Some(&token))
            .await?;
        Ok(HostelRecord::list_from(list_field(&value, &["data", "hostels"])))
    }

    /// Submit a new PG; returns the backend's confirmation message
    pub async fn add_hostel(&self, form: &NewHostel) -> ApiResult<String> {
        form.validate()?;
        let token = require_owner(&self.session).await?;

        let user = self.session.user().await?;
        let owner_id = form
            .owner_id
            .clone()
            .or_else(|| user.as_ref().and_then(|user| user.id.clone()))
            .ok_or_else(|| {
                ApiError::BadRequest("Owner ID missing! Please login again.".to_string())
            })?;
        let owner_name = form
            .owner_name
            .clone()
            .or_else(|| user.as_ref().and_then(|user| user.name.clone()))
            .unwrap_or_else(|| "Owner".to_string());

        info!(
            "Uploading hostel {} with {} images",
            form.hostel_name,
            form.images.len()
        );
        let value = self
            .backend
            .post_multipart(
                "/hostel/addhostel",
                form.to_multipart(&owner_id, &owner_name),
                Some(&token),
            )
            .await?;

        match value.get("message").and_then(display_text) {
            Some(message) => Ok(message),
            None => {
                warn!("Upload response carried no message");
                Ok("Hostel Uploaded Successfully!".to_string())
            }
        }
    }
}
