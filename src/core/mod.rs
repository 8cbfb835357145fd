// Core exports
pub mod catalog;
pub mod directory;
pub mod filters;
pub mod payment;

pub use directory::{find_by_id, live_or_static, search, SearchResult};
pub use filters::{has_all, matches_municipality, matches_search, FilterError, ListingFilter, PriceRange};
pub use payment::{PaymentError, PaymentMethod, PaymentPhase, PaymentSimulation};
