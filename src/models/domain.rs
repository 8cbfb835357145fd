use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language of the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    /// Arabic is rendered right-to-left
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ar" => Ok(Language::Ar),
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text carried in every supported language
///
/// Arabic and French are always present; English is optional and falls back
/// to French when missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub ar: String,
    pub fr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl LocalizedText {
    pub fn new(ar: &str, fr: &str, en: &str) -> Self {
        Self {
            ar: ar.to_string(),
            fr: fr.to_string(),
            en: if en.is_empty() { None } else { Some(en.to_string()) },
        }
    }

    /// Get the text in the requested language, falling back to French then Arabic
    pub fn get(&self, lang: Language) -> &str {
        let requested = match lang {
            Language::Ar => Some(self.ar.as_str()),
            Language::Fr => Some(self.fr.as_str()),
            Language::En => self.en.as_deref(),
        };

        requested
            .filter(|text| !text.trim().is_empty())
            .or_else(|| Some(self.fr.as_str()).filter(|text| !text.trim().is_empty()))
            .unwrap_or(self.ar.as_str())
    }

    /// Iterate over every non-empty translation
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        [Some(self.ar.as_str()), Some(self.fr.as_str()), self.en.as_deref()]
            .into_iter()
            .flatten()
            .filter(|text| !text.is_empty())
    }
}

/// Kind of directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Kindergarten,
    Doctor,
    SpeechTherapist,
    ClothingStore,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Kindergarten,
        Category::Doctor,
        Category::SpeechTherapist,
        Category::ClothingStore,
    ];

    /// Path segment used by the HTTP routes
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Kindergarten => "kindergartens",
            Category::Doctor => "doctors",
            Category::SpeechTherapist => "speech-therapists",
            Category::ClothingStore => "clothing-stores",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Whether parents can book an appointment with this kind of listing
    pub fn accepts_bookings(&self) -> bool {
        !matches!(self, Category::ClothingStore)
    }
}

/// Accepted child age range, in years
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(default)]
    pub min: u8,
    #[serde(default)]
    pub max: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(default)]
    pub open: String,
    #[serde(default)]
    pub close: String,
    #[serde(default)]
    pub days: String,
}

/// A directory entry: kindergarten, doctor, speech therapist or clothing store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub category: Category,
    pub name: LocalizedText,
    pub address: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(rename = "municipalityId")]
    pub municipality_id: String,
    pub phone: String,
    pub rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    #[serde(default)]
    pub images: Vec<String>,
    /// Monthly fee or consultation fee in DZD, 0 when not applicable
    pub price: u32,
    #[serde(rename = "ageRange", default)]
    pub age_range: AgeRange,
    #[serde(rename = "workingHours", default)]
    pub working_hours: WorkingHours,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(rename = "hasAutismWing", default)]
    pub has_autism_wing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<LocalizedText>,
    #[serde(rename = "ownerId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Row of the remote `kindergartens` table
///
/// Every array or object column may be missing or null; those default to
/// empty values when mapped into a [`Listing`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KindergartenRow {
    pub id: serde_json::Value,
    #[serde(default)]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub name_fr: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub address_ar: Option<String>,
    #[serde(default)]
    pub address_fr: Option<String>,
    #[serde(default)]
    pub address_en: Option<String>,
    #[serde(default)]
    pub description_ar: Option<String>,
    #[serde(default)]
    pub description_fr: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub municipality_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub age_range: Option<AgeRange>,
    #[serde(default)]
    pub working_hours: Option<WorkingHours>,
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default)]
    pub activities: Option<Vec<String>>,
    #[serde(default)]
    pub facilities: Option<Vec<String>>,
    #[serde(default)]
    pub has_autism_wing: Option<bool>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl From<KindergartenRow> for Listing {
    fn from(row: KindergartenRow) -> Self {
        let id = match row.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };

        let localized = |ar: Option<String>, fr: Option<String>, en: Option<String>| LocalizedText {
            ar: ar.unwrap_or_default(),
            fr: fr.unwrap_or_default(),
            en: en.filter(|s| !s.is_empty()),
        };

        // Negative or non-finite prices are treated as "not applicable"
        let price = row
            .price
            .filter(|p| p.is_finite() && *p > 0.0)
            .map(|p| p.round().min(u32::MAX as f64) as u32)
            .unwrap_or(0);

        Listing {
            id,
            category: Category::Kindergarten,
            name: localized(row.name_ar, row.name_fr, row.name_en),
            address: localized(row.address_ar, row.address_fr, row.address_en),
            description: localized(row.description_ar, row.description_fr, row.description_en),
            municipality_id: row.municipality_id.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            rating: row.rating.filter(|r| r.is_finite()).unwrap_or(0.0).clamp(0.0, 5.0),
            review_count: row.review_count.unwrap_or(0),
            images: row.images.unwrap_or_default(),
            price,
            age_range: row.age_range.unwrap_or_default(),
            working_hours: row.working_hours.unwrap_or_default(),
            services: row.services.unwrap_or_default(),
            activities: row.activities.unwrap_or_default(),
            facilities: row.facilities.unwrap_or_default(),
            has_autism_wing: row.has_autism_wing.unwrap_or(false),
            specialty: None,
            owner_id: row.owner_id,
        }
    }
}

/// Entry of a small fixed lookup table (municipality, service, activity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: String,
    pub name: LocalizedText,
    pub icon: String,
}

/// Registration request written to the remote `registration_requests` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub kindergarten_id: String,
    pub user_id: String,
    pub parent_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub child_name: String,
    pub child_age: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Booking request written to the remote `bookings` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub listing_id: String,
    pub listing_category: Category,
    pub user_id: String,
    pub parent_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub child_name: String,
    pub child_age: u8,
    pub preferred_date: chrono::NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Kind of request a parent submits against a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Registration,
    Booking,
}

/// Parent review, read-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub author_name: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// User resolved from a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Session returned by the auth service after sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: AuthUser,
}

fn default_token_type() -> String { "bearer".to_string() }

/// Roles checked through the `has_role` remote procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Owner,
    Admin,
}

impl AppRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Owner => "owner",
            AppRole::Admin => "admin",
        }
    }
}

/// Where the kindergarten list was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Static,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_fallback() {
        let text = LocalizedText::new("روضة", "Crèche", "");
        assert_eq!(text.get(Language::Ar), "روضة");
        assert_eq!(text.get(Language::En), "Crèche");

        let arabic_only = LocalizedText::new("روضة", "", "");
        assert_eq!(arabic_only.get(Language::Fr), "روضة");
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("AR".parse::<Language>().unwrap(), Language::Ar);
        assert_eq!(" en ".parse::<Language>().unwrap(), Language::En);
        assert!("de".parse::<Language>().is_err());
        assert!(Language::Ar.is_rtl());
    }

    #[test]
    fn test_row_defaults_missing_columns() {
        let row: KindergartenRow = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name_fr": "Les Petits Anges",
            "services": null,
        }))
        .unwrap();

        let listing = Listing::from(row);
        assert_eq!(listing.id, "42");
        assert_eq!(listing.category, Category::Kindergarten);
        assert!(listing.services.is_empty());
        assert!(listing.activities.is_empty());
        assert!(listing.images.is_empty());
        assert_eq!(listing.age_range, AgeRange::default());
        assert_eq!(listing.price, 0);
        assert_eq!(listing.rating, 0.0);
        assert!(!listing.has_autism_wing);
    }

    #[test]
    fn test_row_rejects_negative_values() {
        let row: KindergartenRow = serde_json::from_value(serde_json::json!({
            "id": "k-1",
            "price": -10.0,
            "rating": -2.0,
        }))
        .unwrap();

        let listing = Listing::from(row);
        assert_eq!(listing.price, 0);
        assert_eq!(listing.rating, 0.0);
    }

    #[test]
    fn test_category_slugs() {
        for category in Category::ALL {
            assert_eq!(Category::from_slug(category.slug()), Some(category));
        }
        assert!(Category::from_slug("bakeries").is_none());
        assert!(!Category::ClothingStore.accepts_bookings());
    }
}
