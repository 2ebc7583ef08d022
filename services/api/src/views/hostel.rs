//! Hostel detail page: listing, food menu, like state and booking form

use common::normalize::{MenuRow, SharingPlan};

use crate::error::{ApiError, ApiResult};
use crate::models::{BookingRequest, HostelRecord, Listing};
use crate::scope::ViewScope;
use crate::state::AppState;

use super::Loadable;
use super::home::liked_ids;

/// Image carousel position; wraps around at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    /// A carousel over `len` images; an empty set still shows one slot
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// Jump to a thumbnail; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> usize {
        if index < self.len {
            self.index = index;
        }
        self.index
    }
}

/// Hostel detail view-model
#[derive(Debug, Clone, PartialEq)]
pub struct HostelView {
    pub id: String,
    pub hostel: Loadable<Listing>,
    pub record: Option<HostelRecord>,
    pub menu: Loadable<Vec<MenuRow>>,
    pub liked: Loadable<bool>,
    pub carousel: Carousel,
    placeholder: String,
}

impl HostelView {
    /// Fetch the hostel, its menu and the like state independently
    pub async fn load(state: &AppState, scope: &ViewScope, id: &str) -> Option<Self> {
        let id = id.trim().to_string();

        let (record, menu, liked) = scope
            .run(async {
                tokio::join!(
                    state.hostels.find(&id),
                    state.menus.menu(&id),
                    liked_ids(state)
                )
            })
            .await?;

        let (hostel, record) = match record {
            Ok(record) => (
                Loadable::Ready(Listing::from_record(&record, &state.normalizers)),
                Some(record),
            ),
            Err(e) => (Loadable::from_result(Err(e)), None),
        };
        let carousel = Carousel::new(hostel.ready().map_or(1, |listing| listing.images.len()));
        let is_liked = liked.iter().any(|liked| liked == &id);

        Some(Self {
            hostel,
            record,
            menu: Loadable::from_list(menu),
            liked: Loadable::Ready(is_liked),
            carousel,
            placeholder: state.normalizers.images.placeholder().to_string(),
            id,
        })
    }

    /// Image under the carousel, or the local fallback
    pub fn current_image(&self) -> &str {
        match self.hostel.ready() {
            Some(listing) => listing.image_or_placeholder(self.carousel.index()),
            None => &self.placeholder,
        }
    }

    /// Plans offered in the booking form
    pub fn sharing_options(&self) -> Vec<SharingPlan> {
        self.hostel
            .ready()
            .map(|listing| listing.sharing_plans.clone())
            .unwrap_or_default()
    }

    /// A booking request for this hostel with the cached profile pre-filled
    pub async fn booking_form(&self, state: &AppState) -> ApiResult<BookingRequest> {
        let user = state.session.user().await?.unwrap_or_default();

        Ok(BookingRequest {
            hostel_id: self.id.clone(),
            user_name: user.name.unwrap_or_default(),
            user_email: user.email.unwrap_or_default(),
            user_phone: user.phone.unwrap_or_default(),
            sharing_type: self
                .sharing_options()
                .first()
                .map(|plan| plan.key.clone())
                .unwrap_or_default(),
            booking_date: String::new(),
        })
    }

    /// Submit a booking for this hostel
    pub async fn book(&self, state: &AppState, request: &BookingRequest) -> ApiResult<String> {
        if request.hostel_id.trim() != self.id {
            return Err(ApiError::BadRequest(
                "Booking belongs to another hostel".to_string(),
            ));
        }
        state.bookings.request(request).await
    }

    /// Toggle the like; `LoginRequired` means "show the login prompt"
    pub async fn toggle_like(&mut self, state: &AppState) -> ApiResult<bool> {
        let liked = state.likes.toggle(&self.id).await?;
        self.liked = Loadable::Ready(liked);
        Ok(liked)
    }
}
