use config::{Config, ConfigError, Environment, File};
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub tables: TableSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub remote: RemoteSettings,
    #[serde(default)]
    pub payment: PaymentSettings,
    #[serde(default)]
    pub submission: SubmissionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
    /// Verifies access tokens locally when set
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 15 }

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_kindergartens_table")]
    pub kindergartens: String,
    #[serde(default = "default_registrations_table")]
    pub registration_requests: String,
    #[serde(default = "default_bookings_table")]
    pub bookings: String,
    #[serde(default = "default_reviews_table")]
    pub reviews: String,
    #[serde(default = "default_profiles_table")]
    pub profiles: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            kindergartens: default_kindergartens_table(),
            registration_requests: default_registrations_table(),
            bookings: default_bookings_table(),
            reviews: default_reviews_table(),
            profiles: default_profiles_table(),
        }
    }
}

fn default_kindergartens_table() -> String { "kindergartens".to_string() }
fn default_registrations_table() -> String { "registration_requests".to_string() }
fn default_bookings_table() -> String { "bookings".to_string() }
fn default_reviews_table() -> String { "reviews".to_string() }
fn default_profiles_table() -> String { "profiles".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Staleness window of the remote kindergarten list
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            max_entries: default_cache_entries(),
        }
    }
}

fn default_cache_ttl() -> u64 { 300 }
fn default_cache_entries() -> u64 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSettings {
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_retry_attempts() -> u32 { 1 }
fn default_retry_delay_ms() -> u64 { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSettings {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            progress_step: default_progress_step(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

fn default_tick_interval_ms() -> u64 { 200 }
fn default_progress_step() -> u8 { 5 }
fn default_session_ttl_secs() -> u64 { 600 }

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionSettings {
    #[serde(default = "default_form_reset_delay_ms")]
    pub form_reset_delay_ms: u64,
    /// Local time offset of the families (Algeria is UTC+1)
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            form_reset_delay_ms: default_form_reset_delay_ms(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl SubmissionSettings {
    /// Configured offset, UTC when out of range
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
    }
}

fn default_form_reset_delay_ms() -> u64 { 3000 }
fn default_utc_offset_minutes() -> i32 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with KIDS_)
    /// 5. The backend endpoint/key pair (SUPABASE_URL, SUPABASE_ANON_KEY, SUPABASE_JWT_SECRET)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., KIDS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("KIDS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = apply_backend_env(settings)?.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("KIDS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = apply_backend_env(settings)?.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    /// Reject values the services cannot run with
    pub fn check(&self) -> Result<(), ConfigError> {
        let payment = &self.payment;
        if payment.progress_step == 0 || payment.progress_step > 100 {
            return Err(ConfigError::Message(format!(
                "payment.progress_step must be between 1 and 100, got {}",
                payment.progress_step
            )));
        }
        if payment.tick_interval_ms == 0 {
            return Err(ConfigError::Message("payment.tick_interval_ms must be positive".to_string()));
        }
        if FixedOffset::east_opt(self.submission.utc_offset_minutes.saturating_mul(60)).is_none() {
            return Err(ConfigError::Message(format!(
                "submission.utc_offset_minutes out of range: {}",
                self.submission.utc_offset_minutes
            )));
        }
        Ok(())
    }
}

/// Override the backend endpoint/key pair from the conventional variables
fn apply_backend_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("supabase.url", "SUPABASE_URL"),
        ("supabase.anon_key", "SUPABASE_ANON_KEY"),
        ("supabase.jwt_secret", "SUPABASE_JWT_SECRET"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (key, var) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
