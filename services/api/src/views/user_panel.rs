//! User panel: cached profile, liked hostels and booking history

use auth::UserProfile;

use crate::error::ApiResult;
use crate::middleware::require_login;
use crate::models::{Booking, Listing};
use crate::scope::ViewScope;
use crate::state::AppState;

use super::Loadable;

/// User panel view-model
#[derive(Debug, Clone, PartialEq)]
pub struct UserPanel {
    pub profile: UserProfile,
    pub greeting: String,
    pub profile_image: String,
    pub liked: Loadable<Vec<Listing>>,
    pub bookings: Loadable<Vec<Booking>>,
}

impl UserPanel {
    /// Requires a session; the profile comes from the cache, lists from the backend
    pub async fn load(state: &AppState, scope: &ViewScope) -> ApiResult<Option<Self>> {
        require_login(&state.session).await?;

        let profile = state.session.user().await?.unwrap_or_default();
        let greeting = profile
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("User")
            .to_string();
        let profile_image = state
            .normalizers
            .images
            .resolve(profile.profile_image.as_deref());

        let Some((liked, bookings)) = scope
            .run(async { tokio::join!(state.likes.liked_hostels(), state.bookings.history()) })
            .await
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            profile,
            greeting,
            profile_image,
            liked: Loadable::from_list(
                liked.map(|records| Listing::from_records(&records, &state.normalizers)),
            ),
            bookings: Loadable::from_list(bookings),
        }))
    }
}
