//! Authentication flows against the HloPG backend

use common::Backend;
use common::http::MultipartBody;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::{AuthError, AuthResult};
use crate::models::{
    AuthPayload, LoginCredentials, NewUser, PasswordChange, Role, Session, SignupForm, UpdateUser,
    UserProfile,
};
use crate::oauth::fetch_google_profile;
use crate::session::SessionManager;
use crate::validation;

/// Purpose sent with the OTP that completes a registration
const REGISTRATION_PURPOSE: &str = "REGISTRATION";

/// Multipart field carrying a new profile picture
const PROFILE_IMAGE_FIELD: &str = "profileImage";

/// Client for the `/auth` endpoints
#[derive(Clone)]
pub struct AuthClient {
    backend: Backend,
    session: SessionManager,
    google_userinfo_url: String,
}

impl AuthClient {
    pub fn new(backend: Backend, session: SessionManager, google_userinfo_url: &str) -> Self {
        Self {
            backend,
            session,
            google_userinfo_url: google_userinfo_url.to_string(),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Log in with a known role and store the session
    pub async fn login(&self, role: Role, credentials: &LoginCredentials) -> AuthResult<Session> {
        validate_credentials(credentials)?;
        info!("Logging in as {}", role);

        let value = self
            .backend
            .post_json(
                &format!("/auth/login/{}", role.login_segment()),
                login_body(credentials),
                None,
            )
            .await?;

        let (token, user) = parse_auth_payload(&value)?;
        self.session
            .establish(&token, Some(role), user.as_ref())
            .await
    }

    /// Log in without knowing the role: owner first, then user
    ///
    /// Any previous session is wiped before the first attempt.
    pub async fn common_login(&self, credentials: &LoginCredentials) -> AuthResult<Session> {
        validate_credentials(credentials)?;
        self.session.clear_all().await?;

        match self.login(Role::Owner, credentials).await {
            Ok(session) => return Ok(session),
            Err(e) => debug!("Owner login failed, trying user login: {}", e),
        }

        match self.login(Role::User, credentials).await {
            Ok(session) => Ok(session),
            Err(e) if e.is_rejection() => {
                warn!("Login rejected for both roles");
                Err(AuthError::InvalidCredentials)
            }
            Err(AuthError::UnexpectedResponse(message)) => {
                warn!("Login response without a token: {}", message);
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => Err(e),
        }
    }

    /// Register a new user account; returns the phone number awaiting the OTP
    pub async fn register(&self, form: &SignupForm) -> AuthResult<String> {
        validation::validate_passwords_match(&form.password, &form.confirm_password)
            .map_err(AuthError::Validation)?;
        validation::validate_name(&form.name).map_err(AuthError::Validation)?;
        validation::validate_email(&form.email).map_err(AuthError::Validation)?;
        validation::validate_phone(&form.phone).map_err(AuthError::Validation)?;
        validation::validate_password(&form.password).map_err(AuthError::Validation)?;

        let user = NewUser {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            password: form.password.clone(),
        };
        info!("Registering user {}", user.email);

        let body = serde_json::to_value(&user)
            .map_err(|e| AuthError::UnexpectedResponse(format!("Unserializable signup: {}", e)))?;
        self.backend.post_json("/auth/register/user", body, None).await?;

        Ok(user.phone)
    }

    /// Confirm a registration with the four digit code sent by SMS
    pub async fn verify_otp(&self, phone: &str, code: &str) -> AuthResult<()> {
        validation::validate_otp(code).map_err(AuthError::Validation)?;
        info!("Verifying registration OTP");

        self.backend
            .post_json(
                "/auth/verify-otp",
                json!({
                    "identifier": phone.trim(),
                    "otpCode": code.trim(),
                    "purpose": REGISTRATION_PURPOSE,
                }),
                None,
            )
            .await?;
        Ok(())
    }

    /// Exchange a Google access token for a backend session
    pub async fn google_login(&self, access_token: &str) -> AuthResult<Session> {
        let http = self.backend.http();
        let profile =
            fetch_google_profile(http.as_ref(), &self.google_userinfo_url, access_token).await?;
        info!("Google login for {}", profile.email);

        let value = self
            .backend
            .post_json(
                "/auth/google-login",
                json!({"email": profile.email, "name": profile.display_name()}),
                None,
            )
            .await?;

        let (token, user) = parse_auth_payload(&value)?;
        self.session
            .establish(&token, Some(Role::User), user.as_ref())
            .await
    }

    /// Fetch the logged-in profile and refresh the cached copy
    pub async fn current_profile(&self) -> AuthResult<UserProfile> {
        let token = self.session.require_token().await?;

        let value = self.backend.get("/auth/userid", &[], Some(&token)).await?;
        let profile = parse_profile(&value)?;
        self.session.update_user(&profile).await?;

        Ok(profile)
    }

    /// Update name, email, phone or gender
    pub async fn update_basic_info(&self, update: &UpdateUser) -> AuthResult<UserProfile> {
        let token = self.session.require_token().await?;

        if update.is_empty() {
            return Err(AuthError::Validation("Nothing to update".to_string()));
        }
        if let Some(name) = &update.name {
            validation::validate_name(name).map_err(AuthError::Validation)?;
        }
        if let Some(email) = &update.email {
            validation::validate_email(email).map_err(AuthError::Validation)?;
        }
        if let Some(phone) = &update.phone {
            validation::validate_phone(phone).map_err(AuthError::Validation)?;
        }

        let body = serde_json::to_value(update)
            .map_err(|e| AuthError::UnexpectedResponse(format!("Unserializable update: {}", e)))?;
        self.backend
            .put_json("/auth/update-basic-info", body, Some(&token))
            .await?;

        let mut profile = self.session.user().await?.unwrap_or_default();
        update.apply_to(&mut profile);
        self.session.update_user(&profile).await?;

        Ok(profile)
    }

    /// Upload a new profile picture
    pub async fn update_profile_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> AuthResult<UserProfile> {
        let token = self.session.require_token().await?;
        if bytes.is_empty() {
            return Err(AuthError::Validation("Choose an image to upload".to_string()));
        }

        info!("Uploading profile image {} ({} bytes)", file_name, bytes.len());
        let body = MultipartBody::default().file(PROFILE_IMAGE_FIELD, file_name, bytes);
        let value = self
            .backend
            .post_multipart("/auth/update-profile-image", body, Some(&token))
            .await?;

        let mut profile = self.session.user().await?.unwrap_or_default();
        match parse_profile(&value).ok().and_then(|p| p.profile_image) {
            Some(image) => profile.profile_image = Some(image),
            None => warn!("Upload response did not include the new image path"),
        }
        self.session.update_user(&profile).await?;

        Ok(profile)
    }

    /// Change the account password
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> AuthResult<()> {
        let token = self.session.require_token().await?;
        if old_password.is_empty() {
            return Err(AuthError::Validation("Current password is required".to_string()));
        }
        validation::validate_password(new_password).map_err(AuthError::Validation)?;

        let change = PasswordChange {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        let body = serde_json::to_value(&change)
            .map_err(|e| AuthError::UnexpectedResponse(format!("Unserializable change: {}", e)))?;
        self.backend
            .put_json("/auth/change-password", body, Some(&token))
            .await?;

        info!("Password changed");
        Ok(())
    }

    /// Forget the session; one-time UI flags survive
    pub async fn logout(&self) -> AuthResult<()> {
        self.session.clear().await
    }
}

fn validate_credentials(credentials: &LoginCredentials) -> AuthResult<()> {
    if credentials.identifier.trim().is_empty() {
        return Err(AuthError::Validation("Email or phone is required".to_string()));
    }
    if credentials.password.is_empty() {
        return Err(AuthError::Validation("Password is required".to_string()));
    }
    Ok(())
}

fn login_body(credentials: &LoginCredentials) -> Value {
    json!({
        "identifier": credentials.identifier.trim(),
        "password": credentials.password,
    })
}

/// `data` when the envelope nests the payload, the value itself otherwise
fn payload(value: &Value) -> &Value {
    match value.get("data") {
        Some(data) if !data.is_null() => data,
        _ => value,
    }
}

fn parse_auth_payload(value: &Value) -> AuthResult<(String, Option<UserProfile>)> {
    let payload = AuthPayload::from_value(payload(value));

    match payload.token {
        Some(token) => Ok((token, payload.user)),
        None => Err(AuthError::UnexpectedResponse(
            "Login response carried no token".to_string(),
        )),
    }
}

fn parse_profile(value: &Value) -> AuthResult<UserProfile> {
    let data = payload(value);
    let data = data.get("user").unwrap_or(data);

    UserProfile::from_value(data).ok_or_else(|| {
        AuthError::UnexpectedResponse("Profile response carried no user".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_payload_from_nested_data() {
        let value = json!({"success": true, "data": {"token": "t", "user": {"name": "Asha"}}});
        let (token, user) = parse_auth_payload(&value).unwrap();
        assert_eq!(token, "t");
        assert_eq!(user.unwrap().name.as_deref(), Some("Asha"));
    }

    #[test]
    fn test_auth_payload_without_token_is_unexpected() {
        let value = json!({"success": true, "data": {"user": {}}});
        assert!(matches!(
            parse_auth_payload(&value),
            Err(AuthError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_profile_from_flat_or_nested_shapes() {
        let flat = json!({"success": true, "data": {"name": "Ravi"}});
        let nested = json!({"success": true, "user": {"name": "Ravi"}});
        assert_eq!(parse_profile(&flat).unwrap().name.as_deref(), Some("Ravi"));
        assert_eq!(parse_profile(&nested).unwrap().name.as_deref(), Some("Ravi"));
        assert!(parse_profile(&json!({"success": true, "data": "x"})).is_err());
    }
}
