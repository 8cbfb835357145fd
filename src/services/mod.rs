// Service exports
pub mod auth;
pub mod cache;
pub mod directory;
pub mod payments;
pub mod submissions;
pub mod supabase;

pub use auth::{parse_recovery_fragment, AuthError, AuthService, Caller, RecoveryTokens};
pub use cache::{CacheKey, CacheManager, CacheStats};
pub use directory::{DirectoryService, RetryPolicy};
pub use payments::{PaymentRegistry, PaymentTiming};
pub use submissions::{SubmissionError, SubmissionService};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
