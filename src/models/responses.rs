use serde::{Deserialize, Serialize};
use crate::models::domain::{
    AgeRange, AuthUser, Category, DataSource, Language, Listing, LookupEntry, RequestKind, WorkingHours,
};

/// Listing rendered in a single language, as shown on directory cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCard {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub address: String,
    #[serde(rename = "municipalityId")]
    pub municipality_id: String,
    pub phone: String,
    pub rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    pub image: Option<String>,
    pub price: u32,
    #[serde(rename = "hasAutismWing")]
    pub has_autism_wing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl ListingCard {
    pub fn localized(listing: &Listing, lang: Language) -> Self {
        Self {
            id: listing.id.clone(),
            category: listing.category,
            name: listing.name.get(lang).to_string(),
            address: listing.address.get(lang).to_string(),
            municipality_id: listing.municipality_id.clone(),
            phone: listing.phone.clone(),
            rating: listing.rating,
            review_count: listing.review_count,
            image: listing.images.first().cloned(),
            price: listing.price,
            has_autism_wing: listing.has_autism_wing,
            specialty: listing.specialty.as_ref().map(|s| s.get(lang).to_string()),
        }
    }
}

/// Full listing detail in a single language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDetail {
    #[serde(flatten)]
    pub card: ListingCard,
    pub description: String,
    pub images: Vec<String>,
    #[serde(rename = "ageRange")]
    pub age_range: AgeRange,
    #[serde(rename = "workingHours")]
    pub working_hours: WorkingHours,
    pub services: Vec<String>,
    pub activities: Vec<String>,
    pub facilities: Vec<String>,
    pub lang: Language,
    pub rtl: bool,
}

impl ListingDetail {
    pub fn localized(listing: &Listing, lang: Language) -> Self {
        Self {
            card: ListingCard::localized(listing, lang),
            description: listing.description.get(lang).to_string(),
            images: listing.images.clone(),
            age_range: listing.age_range,
            working_hours: listing.working_hours.clone(),
            services: listing.services.clone(),
            activities: listing.activities.clone(),
            facilities: listing.facilities.clone(),
            lang,
            rtl: lang.is_rtl(),
        }
    }
}

/// Response for directory endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsResponse {
    pub listings: Vec<ListingCard>,
    /// Size of the unfiltered list
    pub total: usize,
    pub matched: usize,
    pub source: DataSource,
    pub lang: Language,
}

/// Lookup table entry in a single language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupView {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl LookupView {
    pub fn localized(entry: &LookupEntry, lang: Language) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.get(lang).to_string(),
            icon: entry.icon.clone(),
        }
    }
}

/// Acknowledgment of a registration or booking request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionAck {
    pub success: bool,
    pub kind: RequestKind,
    pub listing_id: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    /// Delay after which the client clears the form
    pub reset_after_ms: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerDashboardResponse {
    pub user: AuthUser,
    pub kindergartens: Vec<ListingCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOverviewResponse {
    pub counts: Vec<CategoryCount>,
    pub kindergarten_source: DataSource,
    pub cached_entries: u64,
}
