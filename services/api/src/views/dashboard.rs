//! Owner dashboard: the owner's PGs, totals, the monthly chart and complaints

use crate::error::ApiResult;
use crate::middleware::require_login;
use crate::models::{DashboardSummary, Listing, RecentComplaints};
use crate::scope::ViewScope;
use crate::state::AppState;

use super::Loadable;

/// Star icons for a 0 to 5 rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarBreakdown {
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, 5.0)
        } else {
            0.0
        };
        let full = rating.floor() as u8;
        let half = rating.fract() > 0.0;

        Self {
            full,
            half,
            empty: 5 - full - u8::from(half),
        }
    }
}

/// Owner dashboard view-model
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerDashboard {
    pub owner_name: String,
    pub pgs: Loadable<Vec<Listing>>,
    pub summary: Loadable<DashboardSummary>,
    pub complaints: Loadable<RecentComplaints>,
}

impl OwnerDashboard {
    /// Requires a session; the three fetches then fail independently
    pub async fn load(state: &AppState, scope: &ViewScope) -> ApiResult<Option<Self>> {
        require_login(&state.session).await?;

        let owner_name = state
            .session
            .user()
            .await?
            .and_then(|user| user.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Owner".to_string());

        let Some((pgs, summary, complaints)) = scope
            .run(async {
                tokio::join!(
                    state.hostels.owner_pgs(),
                    state.dashboard.summary(),
                    state.dashboard.recent_complaints()
                )
            })
            .await
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            owner_name,
            pgs: Loadable::from_list(
                pgs.map(|records| Listing::from_records(&records, &state.normalizers)),
            ),
            summary: Loadable::from_result(summary),
            complaints: Loadable::from_result(complaints),
        }))
    }

    /// True when any panel shows the built-in sample data
    pub fn shows_sample(&self) -> bool {
        self.summary.ready().is_some_and(|summary| summary.sample)
            || self.complaints.ready().is_some_and(|complaints| complaints.sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_breakdown() {
        assert_eq!(
            StarBreakdown::from_rating(4.5),
            StarBreakdown { full: 4, half: true, empty: 0 }
        );
        assert_eq!(
            StarBreakdown::from_rating(3.0),
            StarBreakdown { full: 3, half: false, empty: 2 }
        );
        assert_eq!(
            StarBreakdown::from_rating(7.2),
            StarBreakdown { full: 5, half: false, empty: 0 }
        );
        assert_eq!(
            StarBreakdown::from_rating(-1.0),
            StarBreakdown { full: 0, half: false, empty: 5 }
        );
        assert_eq!(StarBreakdown::from_rating(f64::NAN).empty, 5);
    }
}
