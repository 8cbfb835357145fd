use crate::models::{AuthSession, AuthUser, BookingRequest, KindergartenRow, Listing, RegistrationRequest, Review};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the BaaS
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid credentials or session")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the remote data store
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub kindergartens: String,
    pub registration_requests: String,
    pub bookings: String,
    pub reviews: String,
    pub profiles: String,
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            kindergartens: "kindergartens".to_string(),
            registration_requests: "registration_requests".to_string(),
            bookings: "bookings".to_string(),
            reviews: "reviews".to_string(),
            profiles: "profiles".to_string(),
        }
    }
}

/// BaaS API client
///
/// Talks to the two halves of the backend:
/// - the data API (`/rest/v1`): kindergarten rows, reviews, request inserts,
///   the `has_role` procedure
/// - the auth API (`/auth/v1`): sessions, sign-up, password recovery
///
/// Reads go out with the anonymous key; writes made on behalf of a user carry
/// that user's access token so row-level security applies.
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    /// Create a new client
    pub fn new(
        base_url: String,
        anon_key: String,
        timeout: Duration,
        tables: SupabaseTables,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            client,
            tables,
        })
    }

    pub fn tables(&self) -> &SupabaseTables {
        &self.tables
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Attach the project key and a bearer token (the user's, or the anon key)
    fn authorize(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token.unwrap_or(&self.anon_key))
    }

    /// Turn a non-success status into an error, keeping the body for the logs
    async fn check(response: Response, action: &str) -> Result<Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::debug!("Failed to {}: {} - {}", action, status, body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SupabaseError::Unauthorized),
            StatusCode::NOT_FOUND => Err(SupabaseError::NotFound(action.to_string())),
            _ => Err(SupabaseError::ApiError(format!("Failed to {}: {}", action, status))),
        }
    }

    /// Fetch every kindergarten row, best rated first
    pub async fn fetch_kindergartens(&self) -> Result<Vec<Listing>, SupabaseError> {
        let url = format!("{}?select=*&order=rating.desc", self.rest_url(&self.tables.kindergartens));
        self.fetch_kindergarten_rows(&url).await
    }

    /// Fetch the kindergartens owned by a user
    pub async fn fetch_owned_kindergartens(
        &self,
        owner_id: &str,
        access_token: &str,
    ) -> Result<Vec<Listing>, SupabaseError> {
        let url = format!(
            "{}?select=*&owner_id=eq.{}&order=rating.desc",
            self.rest_url(&self.tables.kindergartens),
            urlencoding::encode(owner_id)
        );

        let response = self
            .authorize(self.client.get(&url), Some(access_token))
            .send()
            .await?;
        let rows = Self::check(response, "fetch owned kindergartens").await?;
        Self::parse_rows(rows).await
    }

    async fn fetch_kindergarten_rows(&self, url: &str) -> Result<Vec<Listing>, SupabaseError> {
        tracing::debug!("Fetching kindergartens from: {}", url);

        let response = self.authorize(self.client.get(url), None).send().await?;
        let response = Self::check(response, "fetch kindergartens").await?;
        Self::parse_rows(response).await
    }

    async fn parse_rows(response: Response) -> Result<Vec<Listing>, SupabaseError> {
        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected an array of rows".into()))?;

        let listings: Vec<Listing> = rows
            .iter()
            .filter_map(|row| match serde_json::from_value::<KindergartenRow>(row.clone()) {
                Ok(row) => Some(Listing::from(row)),
                Err(e) => {
                    tracing::warn!("Skipping malformed kindergarten row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} kindergartens ({} rows)", listings.len(), rows.len());

        Ok(listings)
    }

    /// Fetch the reviews of a listing, newest first
    pub async fn fetch_reviews(&self, listing_id: &str) -> Result<Vec<Review>, SupabaseError> {
        let url = format!(
            "{}?select=author_name,rating,comment,created_at&kindergarten_id=eq.{}&order=created_at.desc",
            self.rest_url(&self.tables.reviews),
            urlencoding::encode(listing_id)
        );

        let response = self.authorize(self.client.get(&url), None).send().await?;
        let response = Self::check(response, "fetch reviews").await?;

        response
            .json::<Vec<Review>>()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse reviews: {}", e)))
    }

    /// Insert one row on behalf of a user
    async fn insert<T: Serialize>(
        &self,
        table: &str,
        row: &T,
        access_token: &str,
    ) -> Result<(), SupabaseError> {
        let response = self
            .authorize(self.client.post(self.rest_url(table)), Some(access_token))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        Self::check(response, &format!("insert into {}", table)).await?;
        tracing::debug!("Inserted row into {}", table);
        Ok(())
    }

    pub async fn insert_registration(
        &self,
        request: &RegistrationRequest,
        access_token: &str,
    ) -> Result<(), SupabaseError> {
        self.insert(&self.tables.registration_requests, request, access_token).await
    }

    pub async fn insert_booking(&self, request: &BookingRequest, access_token: &str) -> Result<(), SupabaseError> {
        self.insert(&self.tables.bookings, request, access_token).await
    }

    /// Create the profile side-record of a freshly signed-up user
    pub async fn insert_profile(
        &self,
        user_id: &str,
        full_name: &str,
        phone: Option<&str>,
        access_token: &str,
    ) -> Result<(), SupabaseError> {
        let row = json!({ "id": user_id, "full_name": full_name, "phone": phone });
        self.insert(&self.tables.profiles, &row, access_token).await
    }

    /// Ask the `has_role` remote procedure whether a user holds a role
    pub async fn has_role(&self, user_id: &str, role: &str, access_token: &str) -> Result<bool, SupabaseError> {
        let response = self
            .authorize(self.client.post(self.rest_url("rpc/has_role")), Some(access_token))
            .json(&json!({ "_user_id": user_id, "_role": role }))
            .send()
            .await?;
        let response = Self::check(response, "check role").await?;

        let value: Value = response.json().await?;
        value
            .as_bool()
            .ok_or_else(|| SupabaseError::InvalidResponse(format!("has_role returned {}", value)))
    }

    /// Email/password sign-in
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, SupabaseError> {
        let response = self
            .authorize(self.client.post(self.auth_url("token?grant_type=password")), None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        // The auth API answers bad credentials with 400
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(SupabaseError::Unauthorized);
        }
        let response = Self::check(response, "sign in").await?;

        response
            .json::<AuthSession>()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse session: {}", e)))
    }

    /// Register a new account
    ///
    /// Returns the session when the project does not require email
    /// confirmation, `None` otherwise.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(AuthUser, Option<AuthSession>), SupabaseError> {
        let response = self
            .authorize(self.client.post(self.auth_url("signup")), None)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }))
            .send()
            .await?;
        let response = Self::check(response, "sign up").await?;

        let json: Value = response.json().await?;

        if json.get("access_token").is_some() {
            let session: AuthSession = serde_json::from_value(json)
                .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse session: {}", e)))?;
            return Ok((session.user.clone(), Some(session)));
        }

        let user_json = json.get("user").cloned().unwrap_or(json);
        let user: AuthUser = serde_json::from_value(user_json)
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse user: {}", e)))?;
        Ok((user, None))
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        let response = self
            .authorize(self.client.post(self.auth_url("logout")), Some(access_token))
            .send()
            .await?;
        Self::check(response, "sign out").await?;
        Ok(())
    }

    /// Look up the user a session token belongs to
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, SupabaseError> {
        let response = self
            .authorize(self.client.get(self.auth_url("user")), Some(access_token))
            .send()
            .await?;
        let response = Self::check(response, "look up session").await?;

        response
            .json::<AuthUser>()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse user: {}", e)))
    }

    /// Set a new password for the user the token belongs to
    pub async fn update_password(&self, access_token: &str, new_password: &str) -> Result<AuthUser, SupabaseError> {
        let response = self
            .authorize(self.client.put(self.auth_url("user")), Some(access_token))
            .json(&json!({ "password": new_password }))
            .send()
            .await?;
        let response = Self::check(response, "update password").await?;

        response
            .json::<AuthUser>()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse user: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SupabaseClient::new(
            "https://project.supabase.test/".to_string(),
            "anon".to_string(),
            Duration::from_secs(5),
            SupabaseTables::default(),
        )
        .unwrap();

        assert_eq!(client.base_url, "https://project.supabase.test");
        assert_eq!(client.rest_url("kindergartens"), "https://project.supabase.test/rest/v1/kindergartens");
        assert_eq!(client.auth_url("user"), "https://project.supabase.test/auth/v1/user");
    }
}
