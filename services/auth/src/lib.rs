//! Authentication client for HloPG
//!
//! Login, registration, OTP verification, Google sign-in and profile
//! management, plus the [`SessionManager`] that owns the persisted session.

pub mod client;
pub mod error;
pub mod models;
pub mod oauth;
pub mod session;
pub mod validation;

pub use client::AuthClient;
pub use error::{AuthError, AuthResult};
pub use models::{LoginCredentials, Role, Session, SignupForm, UpdateUser, UserProfile};
pub use session::SessionManager;
