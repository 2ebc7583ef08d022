//! Authentication client models

pub mod role;
pub mod session;
pub mod user;

// Re-export for convenience
pub use role::Role;
pub use session::{AuthPayload, Session};
pub use user::{LoginCredentials, NewUser, PasswordChange, SignupForm, UpdateUser, UserProfile};
