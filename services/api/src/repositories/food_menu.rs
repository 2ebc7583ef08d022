//! Weekly food menu of a hostel

use common::Backend;
use common::normalize::{MenuRow, reshape_menu};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

use super::list_field;

/// Food menu repository
#[derive(Clone)]
pub struct FoodMenuRepository {
    backend: Backend,
}

impl FoodMenuRepository {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Seven rows Monday first, or none when the hostel has no usable menu
    pub async fn menu(&self, hostel_id: &str) -> ApiResult<Vec<MenuRow>> {
        let hostel_id = hostel_id.trim();
        if hostel_id.is_empty() {
            return Err(ApiError::BadRequest("Hostel id is required".to_string()));
        }

        let value = self
            .backend
            .get(&format!("/hostel/food_menu/{}", hostel_id), &[], None)
            .await?;
        let rows = reshape_menu(list_field(&value, &["data", "menu"]));

        debug!("Food menu for {}: {} rows", hostel_id, rows.len());
        Ok(rows)
    }
}
