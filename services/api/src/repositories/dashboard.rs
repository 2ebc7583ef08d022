//! Owner dashboard figures and complaints
//!
//! Both calls fall back to a flagged sample dataset when the backend cannot
//! be reached or refuses; only a missing session is reported as an error.

use auth::SessionManager;
use common::Backend;
use serde_json::Value;
use tracing::warn;

use crate::error::ApiResult;
use crate::middleware::require_login;
use crate::models::{DashboardSummary, RecentComplaints};

use super::field_or_root;

/// Dashboard repository
#[derive(Clone)]
pub struct DashboardRepository {
    backend: Backend,
    session: SessionManager,
}

impl DashboardRepository {
    pub fn new(backend: Backend, session: SessionManager) -> Self {
        Self { backend, session }
    }

    /// Booking and revenue totals with the monthly trend
    pub async fn summary(&self) -> ApiResult<DashboardSummary> {
        let token = require_login(&self.session).await?;

        match self.backend.get("/dashboard/owner", &[], Some(&token)).await {
            Ok(value) => Ok(DashboardSummary::from_value(field_or_root(
                &value,
                "dashboard",
            ))),
            Err(e) => {
                warn!("Dashboard unavailable, showing sample figures: {}", e);
                Ok(DashboardSummary::sample())
            }
        }
    }

    /// The first three complaints against the owner's PGs
    pub async fn recent_complaints(&self) -> ApiResult<RecentComplaints> {
        let token = require_login(&self.session).await?;

        match self.backend.get("/complaints/owner", &[], Some(&token)).await {
            Ok(value) => Ok(RecentComplaints::from_value(
                value.get("data").unwrap_or(&Value::Null),
            )),
            Err(e) => {
                warn!("Complaints unavailable, showing sample complaints: {}", e);
                Ok(RecentComplaints::sample())
            }
        }
    }
}
