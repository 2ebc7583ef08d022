//! Home page: every hostel grouped into the featured cities

use std::collections::BTreeSet;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::models::Listing;
use crate::scope::ViewScope;
use crate::state::AppState;

use super::Loadable;

/// Cities with their own row on the home page, in display order
pub const FEATURED_CITIES: [&str; 4] = ["Hyderabad", "Chennai", "Mumbai", "Bangalore"];

/// One featured city row
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedCity<'a> {
    pub name: &'static str,
    pub listings: Vec<&'a Listing>,
}

/// Home page view-model
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub hostels: Loadable<Vec<Listing>>,
    liked: BTreeSet<String>,
}

impl HomeView {
    /// Fetch hostels and the liked set concurrently
    ///
    /// `None` when the scope closed before both fetches completed.
    pub async fn load(state: &AppState, scope: &ViewScope) -> Option<Self> {
        let (hostels, liked) = scope
            .run(async { tokio::join!(state.hostels.list(None), liked_ids(state)) })
            .await?;

        let hostels = Loadable::from_list(
            hostels.map(|records| Listing::from_records(&records, &state.normalizers)),
        );

        Some(Self {
            hostels,
            liked: liked.into_iter().collect(),
        })
    }

    /// Listings per featured city; a listing matches when its city contains the name
    pub fn featured(&self) -> Vec<FeaturedCity<'_>> {
        let listings: &[Listing] = self.hostels.ready().map(Vec::as_slice).unwrap_or_default();

        FEATURED_CITIES
            .iter()
            .map(|&name| {
                let needle = name.to_lowercase();
                FeaturedCity {
                    name,
                    listings: listings
                        .iter()
                        .filter(|listing| {
                            listing
                                .city
                                .as_deref()
                                .is_some_and(|city| city.to_lowercase().contains(&needle))
                        })
                        .collect(),
                }
            })
            .collect()
    }

    pub fn is_liked(&self, hostel_id: &str) -> bool {
        self.liked.contains(hostel_id)
    }

    /// Toggle a like; `LoginRequired` means "show the login prompt"
    pub async fn toggle_like(&mut self, state: &AppState, hostel_id: &str) -> ApiResult<bool> {
        let liked = state.likes.toggle(hostel_id).await?;
        if liked {
            self.liked.insert(hostel_id.to_string());
        } else {
            self.liked.remove(hostel_id);
        }
        Ok(liked)
    }
}

/// The liked set for heart icons; logged out means nothing is liked
pub(crate) async fn liked_ids(state: &AppState) -> Vec<String> {
    match state.likes.liked_ids().await {
        Ok(ids) => ids,
        Err(ApiError::LoginRequired) => Vec::new(),
        Err(e) => {
            warn!("Liked hostels unavailable, using the cached copy: {}", e);
            state.likes.cached_ids().await.unwrap_or_default()
        }
    }
}
