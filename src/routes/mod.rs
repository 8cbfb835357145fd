// Route exports
pub mod account;
pub mod directory;
pub mod payments;
pub mod requests;

use crate::config::Settings;
use crate::services::{
    AuthService, CacheManager, DirectoryService, PaymentRegistry, PaymentTiming, RetryPolicy, SubmissionService,
    SupabaseClient, SupabaseError, SupabaseTables,
};
use actix_web::{web, HttpRequest};
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub directory: Arc<DirectoryService>,
    pub auth: Arc<AuthService>,
    pub submissions: Arc<SubmissionService>,
    pub payments: Arc<PaymentRegistry>,
}

impl AppState {
    /// Wire every service from the loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self, SupabaseError> {
        let tables = SupabaseTables {
            kindergartens: settings.tables.kindergartens.clone(),
            registration_requests: settings.tables.registration_requests.clone(),
            bookings: settings.tables.bookings.clone(),
            reviews: settings.tables.reviews.clone(),
            profiles: settings.tables.profiles.clone(),
        };

        let supabase = Arc::new(SupabaseClient::new(
            settings.supabase.url.clone(),
            settings.supabase.anon_key.clone(),
            Duration::from_secs(settings.supabase.timeout_secs),
            tables,
        )?);

        let cache = Arc::new(CacheManager::new(settings.cache.max_entries, settings.cache.ttl_secs));
        let retry = RetryPolicy {
            retries: settings.remote.retry_attempts,
            delay: Duration::from_millis(settings.remote.retry_delay_ms),
        };

        let auth = Arc::new(AuthService::new(supabase.clone(), settings.supabase.jwt_secret.as_deref()));
        let timing = PaymentTiming {
            tick_interval: Duration::from_millis(settings.payment.tick_interval_ms),
            progress_step: settings.payment.progress_step,
        };

        Ok(Self {
            directory: Arc::new(DirectoryService::new(supabase.clone(), cache, retry)),
            submissions: Arc::new(SubmissionService::new(
                supabase.clone(),
                settings.submission.form_reset_delay_ms,
                settings.submission.local_offset(),
            )),
            auth,
            payments: Arc::new(PaymentRegistry::new(timing, settings.payment.session_ttl_secs)),
            supabase,
        })
    }
}

/// Token of an `Authorization: Bearer …` header
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            value
                .strip_prefix("Bearer ")
                .or_else(|| value.strip_prefix("bearer "))
        })
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Fixed paths first: the directory routes match any `/{category}`
    cfg.service(
        web::scope("/api/v1")
            .configure(account::configure)
            .configure(payments::configure)
            .configure(requests::configure)
            .configure(directory::configure),
    );
}
