use crate::models::{
    AuthUser, BookingForm, BookingRequest, Listing, RegistrationForm, RegistrationRequest, RequestKind, SubmissionAck,
};
use crate::services::auth::{AuthError, Caller};
use crate::services::supabase::{SupabaseClient, SupabaseError};
use chrono::{FixedOffset, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Errors raised while submitting a registration or booking
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to store {kind:?}: {source}")]
    Store {
        kind: RequestKind,
        #[source]
        source: SupabaseError,
    },
}

/// Writes registration and booking requests on behalf of signed-in parents
///
/// No write is issued unless the session resolves to a user. Insert
/// failures are returned to the caller, never retried.
pub struct SubmissionService {
    supabase: Arc<SupabaseClient>,
    reset_after_ms: u64,
    /// Offset of the families' local time, used for "today"
    local_offset: FixedOffset,
}

/// Blank optional inputs are sent by empty form fields and mean "absent"
fn blank_as_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl SubmissionService {
    pub fn new(supabase: Arc<SupabaseClient>, reset_after_ms: u64, local_offset: FixedOffset) -> Self {
        Self { supabase, reset_after_ms, local_offset }
    }

    fn local_today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.local_offset).date_naive()
    }

    fn ack(&self, kind: RequestKind, listing_id: &str) -> SubmissionAck {
        SubmissionAck {
            success: true,
            kind,
            listing_id: listing_id.to_string(),
            submitted_at: Utc::now(),
            reset_after_ms: self.reset_after_ms,
        }
    }

    /// An anonymous caller is turned away before the form is looked at
    fn signed_in(caller: Option<&Caller>) -> Result<(&AuthUser, &str), SubmissionError> {
        caller
            .map(|c| (&c.user, c.access_token.as_str()))
            .ok_or(SubmissionError::Auth(AuthError::LoginRequired))
    }

    pub async fn register(
        &self,
        caller: Option<&Caller>,
        listing: &Listing,
        mut form: RegistrationForm,
    ) -> Result<SubmissionAck, SubmissionError> {
        let (user, token) = Self::signed_in(caller)?;
        form.email = blank_as_none(form.email);
        form.message = blank_as_none(form.message);
        form.validate()?;

        let request = RegistrationRequest {
            kindergarten_id: listing.id.clone(),
            user_id: user.id.clone(),
            parent_name: form.parent_name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email,
            child_name: form.child_name.trim().to_string(),
            child_age: form.child_age,
            message: form.message,
            created_at: Utc::now(),
        };

        if let Err(source) = self.supabase.insert_registration(&request, token).await {
            tracing::error!("Failed to store registration for {} by {}: {}", listing.id, user.id, source);
            return Err(SubmissionError::Store { kind: RequestKind::Registration, source });
        }

        tracing::info!("Registration stored for kindergarten {} by user {}", listing.id, user.id);
        Ok(self.ack(RequestKind::Registration, &listing.id))
    }

    pub async fn book(
        &self,
        caller: Option<&Caller>,
        listing: &Listing,
        mut form: BookingForm,
    ) -> Result<SubmissionAck, SubmissionError> {
        let (user, token) = Self::signed_in(caller)?;
        form.email = blank_as_none(form.email);
        form.message = blank_as_none(form.message);
        form.validate()?;

        if !listing.category.accepts_bookings() {
            return Err(SubmissionError::InvalidRequest(format!(
                "{} listings do not take bookings",
                listing.category.slug()
            )));
        }

        if form.preferred_date < self.local_today() {
            return Err(SubmissionError::InvalidRequest("preferred date is in the past".to_string()));
        }

        let request = BookingRequest {
            listing_id: listing.id.clone(),
            listing_category: listing.category,
            user_id: user.id.clone(),
            parent_name: form.parent_name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email,
            child_name: form.child_name.trim().to_string(),
            child_age: form.child_age,
            preferred_date: form.preferred_date,
            message: form.message,
            created_at: Utc::now(),
        };

        if let Err(source) = self.supabase.insert_booking(&request, token).await {
            tracing::error!("Failed to store booking for {} by {}: {}", listing.id, user.id, source);
            return Err(SubmissionError::Store { kind: RequestKind::Booking, source });
        }

        tracing::info!("Booking stored for {} {} by user {}", listing.category.slug(), listing.id, user.id);
        Ok(self.ack(RequestKind::Booking, &listing.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_optional_inputs_are_absent() {
        assert_eq!(blank_as_none(Some(String::new())), None);
        assert_eq!(blank_as_none(Some("   ".to_string())), None);
        assert_eq!(blank_as_none(None), None);
        assert_eq!(
            blank_as_none(Some(" amina@example.com ".to_string())).as_deref(),
            Some("amina@example.com")
        );
    }
}
