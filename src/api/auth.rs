//! Authentication endpoints and the Google OAuth redirect leg

use super::{ApiClient, ApiError};
use serde::Serialize;
use serde_json::Value;

/// Field names a login response may carry the token under, in priority order
const TOKEN_FIELDS: [&str; 3] = ["token", "accessToken", "jwt"];

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct EmailOnly<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct NewPassword<'a> {
    password: &'a str,
}

/// First non-empty token field of a login/signup response
pub fn extract_token(body: &Value) -> Option<String> {
    TOKEN_FIELDS.iter().find_map(|field| {
        body.get(*field)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// Pull the `token` query parameter out of an OAuth redirect URL
pub fn token_from_callback(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|t| !t.is_empty())
}

impl ApiClient {
    /// `POST login`; returns the raw body so callers can report a missing token
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        self.post_json(&self.endpoints().login, &Credentials { email, password }, None)
            .await
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        self.post_json(&self.endpoints().signup, &Credentials { email, password }, None)
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Value, ApiError> {
        self.post_json(&self.endpoints().forgot_password, &EmailOnly { email }, None).await
    }

    /// `POST reset_password/{token}` with the new password
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<Value, ApiError> {
        let path = format!(
            "{}/{}",
            self.endpoints().reset_password.trim_end_matches('/'),
            token
        );
        self.post_json(&path, &NewPassword { password }, None).await
    }

    /// Where a browser should be sent to start Google sign-in
    pub fn google_login_url(&self) -> String {
        self.url(&self.endpoints().google_login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockServer;
    use serde_json::json;

    #[test]
    fn test_extract_token_field_priority() {
        assert_eq!(extract_token(&json!({"token": "a", "jwt": "c"})).as_deref(), Some("a"));
        assert_eq!(extract_token(&json!({"accessToken": "b"})).as_deref(), Some("b"));
        assert_eq!(extract_token(&json!({"token": "", "jwt": "c"})).as_deref(), Some("c"));
        assert_eq!(extract_token(&json!({"user": {"token": "x"}})), None);
        assert_eq!(extract_token(&Value::Null), None);
    }

    #[test]
    fn test_token_from_callback() {
        assert_eq!(
            token_from_callback("http://localhost:5173/register?token=abc.def&x=1").as_deref(),
            Some("abc.def")
        );
        assert_eq!(
            token_from_callback("http://localhost/register?token=a%2Bb").as_deref(),
            Some("a+b")
        );
        assert_eq!(token_from_callback("http://localhost/register?token="), None);
        assert_eq!(token_from_callback("http://localhost/register"), None);
        assert_eq!(token_from_callback("not a url"), None);
    }

    #[tokio::test]
    async fn test_auth_calls_hit_configured_paths() {
        let server = MockServer::start().await;
        server.on("POST", "/login", 200, json!({"accessToken": "t1"}));
        server.on("POST", "/auth/reset-password/r3s3t", 200, json!({"ok": true}));
        let client = server.client();

        let body = client.login("a@b.c", "pw").await.unwrap();
        assert_eq!(extract_token(&body).as_deref(), Some("t1"));

        client.reset_password("r3s3t", "newpw").await.unwrap();

        let hits = server.hits();
        assert_eq!(hits[0].body, r#"{"email":"a@b.c","password":"pw"}"#);
        assert_eq!(hits[0].auth, None);
        assert_eq!(hits[1].path, "/auth/reset-password/r3s3t");
        assert_eq!(hits[1].body, r#"{"password":"newpw"}"#);
    }

    #[test]
    fn test_google_login_url() {
        let mut config = crate::config::Config::default();
        config.api_url = "https://api.example.test".to_string();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.google_login_url(), "https://api.example.test/googlelogin");
    }
}
