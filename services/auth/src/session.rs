//! Session management on top of persisted storage
//!
//! [`SessionManager`] is the only component that reads or writes the
//! `hlopg*` storage keys. Everything else asks it for the token, role or
//! cached profile.

use common::Storage;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AuthError, AuthResult};
use crate::models::{Role, Session, UserProfile};

pub const TOKEN_KEY: &str = "hlopgToken";
pub const ROLE_KEY: &str = "hlopgRole";
pub const USER_KEY: &str = "hlopgUser";
pub const LIKED_KEY: &str = "hlopgLikedHostels";
pub const SEEN_INTRO_KEY: &str = "seenIntro";
pub const LOADED_ONCE_KEY: &str = "hasLoadedOnce";

/// Session manager for the persisted login state
#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn Storage>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Persist a freshly issued session
    pub async fn establish(
        &self,
        token: &str,
        role: Option<Role>,
        user: Option<&UserProfile>,
    ) -> AuthResult<Session> {
        info!("Establishing session (role: {:?})", role);

        self.storage.set(TOKEN_KEY, token).await?;
        match role {
            Some(role) => self.storage.set(ROLE_KEY, role.as_str()).await?,
            None => self.storage.remove(ROLE_KEY).await?,
        }
        match user {
            Some(user) => self.update_user(user).await?,
            None => self.storage.remove(USER_KEY).await?,
        }
        // liked state belongs to the previous account, if any
        self.storage.remove(LIKED_KEY).await?;

        Ok(Session {
            token: token.to_string(),
            role,
            user: user.cloned(),
        })
    }

    /// The current session, if a token is stored
    pub async fn current(&self) -> AuthResult<Option<Session>> {
        let Some(token) = self.token().await? else {
            return Ok(None);
        };

        Ok(Some(Session {
            token,
            role: self.role().await?,
            user: self.user().await?,
        }))
    }

    /// The stored token; blank tokens count as absent
    pub async fn token(&self) -> AuthResult<Option<String>> {
        let token = self.storage.get(TOKEN_KEY).await?;
        Ok(token.filter(|token| !token.trim().is_empty()))
    }

    /// The stored token, or `LoginRequired`
    pub async fn require_token(&self) -> AuthResult<String> {
        self.token().await?.ok_or(AuthError::LoginRequired)
    }

    /// The stored role; unknown values count as absent
    pub async fn role(&self) -> AuthResult<Option<Role>> {
        let role = self.storage.get(ROLE_KEY).await?;
        Ok(role.and_then(|role| role.parse().ok()))
    }

    /// The cached profile; an unreadable cache counts as absent
    pub async fn user(&self) -> AuthResult<Option<UserProfile>> {
        let Some(raw) = self.storage.get(USER_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Discarding unreadable cached user: {}", e);
                Ok(None)
            }
        }
    }

    /// Replace the cached profile
    pub async fn update_user(&self, user: &UserProfile) -> AuthResult<()> {
        let raw = serde_json::to_string(user)
            .map_err(|e| AuthError::UnexpectedResponse(format!("Unserializable profile: {}", e)))?;
        self.storage.set(USER_KEY, &raw).await?;
        Ok(())
    }

    /// A token is stored
    pub async fn is_authenticated(&self) -> AuthResult<bool> {
        Ok(self.token().await?.is_some())
    }

    /// A token and a role are stored (what the header shows as "logged in")
    pub async fn is_logged_in(&self) -> AuthResult<bool> {
        Ok(self.token().await?.is_some() && self.role().await?.is_some())
    }

    /// Log out: drop the session keys, keep the one-time UI flags
    pub async fn clear(&self) -> AuthResult<()> {
        info!("Clearing session");

        for key in [TOKEN_KEY, ROLE_KEY, USER_KEY, LIKED_KEY] {
            self.storage.remove(key).await?;
        }
        Ok(())
    }

    /// Drop every stored key, one-time flags included
    pub async fn clear_all(&self) -> AuthResult<()> {
        self.storage.clear().await?;
        Ok(())
    }

    pub async fn has_seen_intro(&self) -> AuthResult<bool> {
        self.flag(SEEN_INTRO_KEY).await
    }

    pub async fn mark_intro_seen(&self) -> AuthResult<()> {
        self.storage.set(SEEN_INTRO_KEY, "true").await?;
        Ok(())
    }

    pub async fn has_loaded_once(&self) -> AuthResult<bool> {
        self.flag(LOADED_ONCE_KEY).await
    }

    pub async fn mark_loaded_once(&self) -> AuthResult<()> {
        self.storage.set(LOADED_ONCE_KEY, "true").await?;
        Ok(())
    }

    /// Advisory copy of the liked hostel ids
    ///
    /// The backend stays authoritative; this is only for showing hearts
    /// before the liked set has been fetched.
    pub async fn liked_cache(&self) -> AuthResult<Vec<String>> {
        let Some(raw) = self.storage.get(LIKED_KEY).await? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }

    /// Overwrite the advisory liked cache
    pub async fn set_liked_cache(&self, ids: &[String]) -> AuthResult<()> {
        let raw = serde_json::to_string(ids)
            .map_err(|e| AuthError::UnexpectedResponse(format!("Unserializable ids: {}", e)))?;
        self.storage.set(LIKED_KEY, &raw).await?;
        Ok(())
    }

    async fn flag(&self, key: &str) -> AuthResult<bool> {
        Ok(self.storage.get(key).await?.as_deref() == Some("true"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::MemoryStorage;

    fn manager() -> (SessionManager, MemoryStorage) {
        let storage = MemoryStorage::new();
        (SessionManager::new(Arc::new(storage.clone())), storage)
    }

    #[tokio::test]
    async fn test_establish_and_read_back() -> AuthResult<()> {
        let (session, _) = manager();
        let user = UserProfile {
            name: Some("Asha".to_string()),
            ..UserProfile::default()
        };

        session.establish("tok", Some(Role::User), Some(&user)).await?;

        let current = session.current().await?.expect("session");
        assert_eq!(current.token, "tok");
        assert_eq!(current.role, Some(Role::User));
        assert_eq!(current.user, Some(user));
        assert!(session.is_logged_in().await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_cached_user_reads_as_none() -> AuthResult<()> {
        let (session, storage) = manager();
        storage.set(TOKEN_KEY, "tok").await?;
        storage.set(USER_KEY, "{not json").await?;

        assert_eq!(session.user().await?, None);
        assert!(session.is_authenticated().await?);
        assert!(!session.is_logged_in().await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_keeps_one_time_flags() -> AuthResult<()> {
        let (session, _) = manager();
        session.establish("tok", Some(Role::Owner), None).await?;
        session.mark_intro_seen().await?;
        session.set_liked_cache(&["1".to_string()]).await?;

        session.clear().await?;

        assert!(session.current().await?.is_none());
        assert!(session.liked_cache().await?.is_empty());
        assert!(session.has_seen_intro().await?);
        assert!(matches!(
            session.require_token().await,
            Err(AuthError::LoginRequired)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_token_is_not_a_session() -> AuthResult<()> {
        let (session, storage) = manager();
        storage.set(TOKEN_KEY, "  ").await?;
        assert!(!session.is_authenticated().await?);
        Ok(())
    }
}
