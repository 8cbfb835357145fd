//! Kids Directory - child services directory for the Mascara wilaya
//!
//! Kindergartens, pediatricians, speech therapists and children's clothing
//! stores, browsable in Arabic, French and English. Kindergartens come from
//! the hosted backend with a built-in catalog as fallback; the other
//! directories are served from the catalog.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{search, ListingFilter, PaymentSimulation, PriceRange};
pub use crate::error::ApiError;
pub use crate::models::{Category, DataSource, Language, Listing, LocalizedText};
pub use crate::routes::{configure_routes, AppState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let listings = crate::core::catalog::listings(Category::ClothingStore);
        let filter = ListingFilter::default().with_municipality("mascara");
        assert_eq!(search(listings, &filter).matched(), 2);
    }
}
