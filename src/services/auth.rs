use crate::models::{AppRole, AuthUser};
use crate::services::supabase::{SupabaseClient, SupabaseError};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while resolving or checking a session
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login required")]
    LoginRequired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Missing role: {0}")]
    Forbidden(&'static str),

    #[error("Invalid recovery link: {0}")]
    InvalidRecoveryLink(String),

    #[error(transparent)]
    Remote(#[from] SupabaseError),
}

/// Claims of a BaaS access token
#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

/// Tokens carried in the URL hash of a password recovery link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Parse `#access_token=…&refresh_token=…&type=recovery`
///
/// The leading `#` is optional. The link must be of type `recovery` and
/// carry an access token.
pub fn parse_recovery_fragment(fragment: &str) -> Result<RecoveryTokens, AuthError> {
    let fragment = fragment.trim().trim_start_matches('#');

    let params: HashMap<String, String> = fragment
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| {
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            (key.to_string(), value)
        })
        .collect();

    if let Some(description) = params.get("error_description") {
        return Err(AuthError::InvalidRecoveryLink(description.clone()));
    }

    match params.get("type").map(String::as_str) {
        Some("recovery") => {}
        Some(other) => return Err(AuthError::InvalidRecoveryLink(format!("unexpected link type {}", other))),
        None => return Err(AuthError::InvalidRecoveryLink("missing link type".to_string())),
    }

    let access_token = params
        .get("access_token")
        .filter(|t| !t.is_empty())
        .cloned()
        .ok_or_else(|| AuthError::InvalidRecoveryLink("missing access token".to_string()))?;

    Ok(RecoveryTokens {
        access_token,
        refresh_token: params.get("refresh_token").cloned(),
    })
}

/// Signed-in caller: the resolved user and the token it was resolved from
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: AuthUser,
    pub access_token: String,
}

/// Session lookup and role checks
///
/// With a JWT secret configured, access tokens are verified locally;
/// otherwise the auth API is asked for the token's user.
pub struct AuthService {
    supabase: Arc<SupabaseClient>,
    jwt: Option<(DecodingKey, Validation)>,
}

impl AuthService {
    pub fn new(supabase: Arc<SupabaseClient>, jwt_secret: Option<&str>) -> Self {
        let jwt = jwt_secret.filter(|s| !s.is_empty()).map(|secret| {
            let mut validation = Validation::new(Algorithm::HS256);
            validation.set_audience(&["authenticated"]);
            (DecodingKey::from_secret(secret.as_bytes()), validation)
        });

        Self { supabase, jwt }
    }

    /// Resolve the user behind a bearer token, `None` when there is no token
    pub async fn session(&self, access_token: Option<&str>) -> Result<Option<AuthUser>, AuthError> {
        let Some(token) = access_token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        if let Some((key, validation)) = &self.jwt {
            let data = decode::<SessionClaims>(token, key, validation)
                .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
            return Ok(Some(AuthUser {
                id: data.claims.sub,
                email: data.claims.email,
                role: data.claims.role,
            }));
        }

        match self.supabase.get_user(token).await {
            Ok(user) => Ok(Some(user)),
            Err(SupabaseError::Unauthorized) => Err(AuthError::InvalidToken("session expired or revoked".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the caller behind a bearer token, `None` when anonymous
    pub async fn caller(&self, access_token: Option<&str>) -> Result<Option<Caller>, AuthError> {
        let user = self.session(access_token).await?;
        Ok(user.map(|user| Caller {
            user,
            access_token: access_token.unwrap_or_default().trim().to_string(),
        }))
    }

    /// Resolve the user behind a bearer token, failing when there is none
    pub async fn require_user(&self, access_token: Option<&str>) -> Result<AuthUser, AuthError> {
        self.session(access_token).await?.ok_or(AuthError::LoginRequired)
    }

    /// Resolve the user and check a role through `has_role`
    pub async fn require_role(&self, access_token: Option<&str>, role: AppRole) -> Result<AuthUser, AuthError> {
        let user = self.require_user(access_token).await?;
        // require_user already rejected a missing token
        let token = access_token.unwrap_or_default().trim();

        if self.supabase.has_role(&user.id, role.as_str(), token).await? {
            Ok(user)
        } else {
            tracing::info!("User {} lacks role {}", user.id, role.as_str());
            Err(AuthError::Forbidden(role.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::supabase::SupabaseTables;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use std::time::Duration;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        email: String,
        role: String,
        aud: String,
        exp: usize,
    }

    fn service(secret: Option<&str>) -> AuthService {
        let client = SupabaseClient::new(
            "http://127.0.0.1:9".to_string(),
            "anon".to_string(),
            Duration::from_secs(1),
            SupabaseTables::default(),
        )
        .unwrap();
        AuthService::new(Arc::new(client), secret)
    }

    fn token(secret: &str, exp: i64) -> String {
        let claims = TestClaims {
            sub: "user-1".to_string(),
            email: "parent@example.com".to_string(),
            role: "authenticated".to_string(),
            aud: "authenticated".to_string(),
            exp: exp as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_parse_recovery_fragment() {
        let tokens = parse_recovery_fragment("#access_token=abc&expires_in=3600&refresh_token=def&type=recovery").unwrap();
        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token.as_deref(), Some("def"));
    }

    #[test]
    fn test_recovery_fragment_rejected() {
        assert!(parse_recovery_fragment("access_token=abc&type=signup").is_err());
        assert!(parse_recovery_fragment("access_token=abc").is_err());
        assert!(parse_recovery_fragment("type=recovery").is_err());
        assert!(parse_recovery_fragment("error=access_denied&error_description=Link+expired").is_err());
    }

    #[tokio::test]
    async fn test_no_token_is_anonymous() {
        let auth = service(Some("secret"));
        assert_eq!(auth.session(None).await.unwrap(), None);
        assert_eq!(auth.session(Some("  ")).await.unwrap(), None);
        assert!(matches!(auth.require_user(None).await, Err(AuthError::LoginRequired)));
    }

    #[tokio::test]
    async fn test_local_token_verification() {
        let auth = service(Some("secret"));
        let exp = chrono::Utc::now().timestamp() + 3600;

        let user = auth.session(Some(&token("secret", exp))).await.unwrap().unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email.as_deref(), Some("parent@example.com"));

        assert!(auth.session(Some(&token("other-secret", exp))).await.is_err());

        let expired = chrono::Utc::now().timestamp() - 3600;
        assert!(auth.session(Some(&token("secret", expired))).await.is_err());
    }
}
