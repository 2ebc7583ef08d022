//! Common library for the HloPG client
//!
//! This crate provides functionality shared by the auth and api crates:
//! configuration, the HTTP transport to the backend, persisted storage, and
//! the normalizers that turn loosely shaped hostel records into display data.

pub mod config;
pub mod error;
pub mod http;
pub mod lenient;
pub mod normalize;
pub mod storage;

pub use config::ClientConfig;
pub use error::{HttpError, HttpResult, StorageError, StorageResult};
pub use http::{Backend, HttpClient, HttpRequest, HttpResponse, Method, ReqwestHttpClient};
pub use normalize::Normalizers;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Example usage of the normalizers
///
/// ```rust
/// use common::normalize::{format_sharing, reshape_menu};
/// use common::Normalizers;
/// use serde_json::json;
///
/// let normalizers = Normalizers::default();
/// let images = normalizers
///     .images
///     .resolve_images(&json!("[\"a.jpg\"]"), &json!(null));
/// assert_eq!(images, vec!["https://www.hlopg.com/uploads/a.jpg".to_string()]);
///
/// assert_eq!(
///     format_sharing(&json!({"single": 5000})),
///     "1-Sharing - ₹5000"
/// );
/// assert_eq!(reshape_menu(&json!({"lunch": {"monday": "Rice"}})).len(), 7);
/// ```
pub fn example_usage() {}
