//! HloPG marketplace client
//!
//! Repositories for hostels, likes, bookings and the owner dashboard, the
//! page view-models built on top of them, and the [`AppState`] that wires
//! everything over one backend transport and one session store.

pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod scope;
pub mod state;
pub mod views;

pub use error::{ApiError, ApiResult};
pub use scope::{ScopeHandle, ViewScope};
pub use state::AppState;
pub use views::Loadable;
