//! Google sign-in: resolve an access token into the profile the backend needs

use common::http::decode_json;
use common::{HttpClient, HttpRequest};
use serde::Deserialize;
use tracing::info;

use crate::error::{AuthError, AuthResult};

/// Google userinfo (v3) response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoogleProfile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

impl GoogleProfile {
    /// Name sent to the backend; falls back to the mailbox name
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Fetch the Google profile behind an OAuth access token
pub async fn fetch_google_profile(
    http: &dyn HttpClient,
    userinfo_url: &str,
    access_token: &str,
) -> AuthResult<GoogleProfile> {
    info!("Fetching Google user profile");

    let request = HttpRequest::get(userinfo_url).bearer(Some(access_token));
    let response = http.send(request).await?;
    let value = decode_json(&response)?;

    serde_json::from_value(value)
        .map_err(|e| AuthError::UnexpectedResponse(format!("Google profile: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::http::MockHttpClient;
    use common::{HttpError, HttpResponse};

    #[tokio::test]
    async fn test_fetch_sends_bearer_to_userinfo() {
        let mut mock = MockHttpClient::new();
        mock.expect_send()
            .withf(|req| {
                req.url == "https://google.test/userinfo" && req.bearer.as_deref() == Some("g-tok")
            })
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 200,
                        body: r#"{"email":"asha@gmail.com","name":"Asha","email_verified":true}"#
                            .to_string(),
                    })
                })
            });

        let profile = fetch_google_profile(&mock, "https://google.test/userinfo", "g-tok")
            .await
            .unwrap();
        assert_eq!(profile.email, "asha@gmail.com");
        assert_eq!(profile.display_name(), "Asha");
        assert!(profile.email_verified);
    }

    #[tokio::test]
    async fn test_expired_token_is_a_status_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_send().returning(|_| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 401,
                    body: r#"{"error":"invalid_token"}"#.to_string(),
                })
            })
        });

        let err = fetch_google_profile(&mock, "https://google.test/userinfo", "old")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::Http(HttpError::Status { status: 401, .. })
        ));
    }

    #[test]
    fn test_display_name_falls_back_to_mailbox() {
        let profile = GoogleProfile {
            email: "ravi@gmail.com".to_string(),
            name: None,
            picture: None,
            email_verified: false,
        };
        assert_eq!(profile.display_name(), "ravi");
    }
}
