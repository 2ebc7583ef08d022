//! Page view-models
//!
//! Each view runs its independent fetches concurrently inside a
//! [`ViewScope`](crate::scope::ViewScope) and keeps a separate [`Loadable`]
//! per fetch, so one failing request never blanks the whole page.

use tracing::warn;

use crate::error::{ApiError, ApiResult};

pub mod city;
pub mod dashboard;
pub mod home;
pub mod hostel;
pub mod user_panel;

pub use city::{CityView, FilterOptions, resolve_city_search, suggest_cities};
pub use dashboard::{OwnerDashboard, StarBreakdown};
pub use home::{FeaturedCity, HomeView};
pub use hostel::{Carousel, HostelView};
pub use user_panel::UserPanel;

/// State of one independent fetch
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    /// Fetched, nothing to show
    Empty,
    /// Fetch failed; holds the message to show in place of the data
    Failed(String),
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn from_result(result: ApiResult<T>) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(ApiError::NotFound(what)) => {
                warn!("Not found: {}", what);
                Loadable::Empty
            }
            Err(e) => {
                warn!("Fetch failed: {}", e);
                Loadable::Failed(e.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Empty => Loadable::Empty,
            Loadable::Failed(message) => Loadable::Failed(message),
            Loadable::Ready(value) => Loadable::Ready(f(value)),
        }
    }
}

impl<T> Loadable<Vec<T>> {
    /// Like [`Loadable::from_result`], with an empty list as `Empty`
    pub fn from_list(result: ApiResult<Vec<T>>) -> Self {
        match Self::from_result(result) {
            Loadable::Ready(items) if items.is_empty() => Loadable::Empty,
            other => other,
        }
    }
}
