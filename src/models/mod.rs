// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeRange, AppRole, AuthSession, AuthUser, BookingRequest, Category, DataSource, KindergartenRow, Language,
    Listing, LocalizedText, LookupEntry, RegistrationRequest, RequestKind, Review, WorkingHours,
};
pub use requests::{
    BookingForm, LangQuery, ListingQuery, RecoveryRequest, RegistrationForm, SignInRequest, SignUpRequest,
    StartPaymentRequest,
};
pub use responses::{
    AdminOverviewResponse, CategoryCount, ErrorResponse, HealthResponse, ListingCard, ListingDetail,
    ListingsResponse, LookupView, OwnerDashboardResponse, SubmissionAck,
};
