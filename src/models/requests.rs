use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Directory query string
///
/// `GET /api/v1/kindergartens?search=anges&municipality=mascara&max_price=5000`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub min_price: Option<u32>,
    #[serde(default)]
    pub max_price: Option<u32>,
    /// Comma separated service ids
    #[serde(default)]
    pub services: Option<String>,
    /// Comma separated activity ids
    #[serde(default)]
    pub activities: Option<String>,
    #[serde(default)]
    pub autism_wing: Option<bool>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// Query string carrying only the display language
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

/// Registration form submitted from the listing detail page
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1, max = 120))]
    #[serde(alias = "parent_name", rename = "parentName")]
    pub parent_name: String,
    #[validate(length(min = 6, max = 20), custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 120))]
    #[serde(alias = "child_name", rename = "childName")]
    pub child_name: String,
    #[validate(range(min = 1, max = 12))]
    #[serde(alias = "child_age", rename = "childAge")]
    pub child_age: u8,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub message: Option<String>,
}

/// Booking form: the registration fields plus the preferred date
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingForm {
    #[validate(length(min = 1, max = 120))]
    #[serde(alias = "parent_name", rename = "parentName")]
    pub parent_name: String,
    #[validate(length(min = 6, max = 20), custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 120))]
    #[serde(alias = "child_name", rename = "childName")]
    pub child_name: String,
    #[validate(range(min = 1, max = 12))]
    #[serde(alias = "child_age", rename = "childAge")]
    pub child_age: u8,
    #[serde(alias = "preferred_date", rename = "preferredDate")]
    pub preferred_date: chrono::NaiveDate,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub message: Option<String>,
}

/// Phone numbers may contain digits, spaces, dashes and a leading `+`
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let body = phone.strip_prefix('+').unwrap_or(phone);
    let valid = body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        && body.chars().any(|c| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1, max = 120))]
    #[serde(alias = "full_name", rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Password recovery callback: the URL hash the auth service redirected to
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecoveryRequest {
    #[validate(length(min = 1))]
    pub fragment: String,
    #[validate(length(min = 6))]
    #[serde(alias = "new_password", rename = "newPassword")]
    pub new_password: String,
}

/// Start a mocked payment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartPaymentRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "listing_id", rename = "listingId")]
    pub listing_id: String,
    #[validate(range(min = 1))]
    pub amount: u32,
    pub method: crate::core::payment::PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            parent_name: "Amina Benali".to_string(),
            phone: "+213 555 12 34 56".to_string(),
            email: None,
            child_name: "Yacine".to_string(),
            child_age: 4,
            message: None,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn test_registration_rejects_bad_fields() {
        let mut form = registration();
        form.phone = "call me".to_string();
        assert!(form.validate().is_err());

        let mut form = registration();
        form.email = Some("not-an-email".to_string());
        assert!(form.validate().is_err());

        let mut form = registration();
        form.child_age = 0;
        assert!(form.validate().is_err());

        let mut form = registration();
        form.parent_name = String::new();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_form_accepts_both_casings() {
        let camel: RegistrationForm = serde_json::from_value(serde_json::json!({
            "parentName": "A", "phone": "0555123456", "childName": "B", "childAge": 3
        }))
        .unwrap();
        let snake: RegistrationForm = serde_json::from_value(serde_json::json!({
            "parent_name": "A", "phone": "0555123456", "child_name": "B", "child_age": 3
        }))
        .unwrap();
        assert_eq!(camel.child_name, snake.child_name);
    }
}
