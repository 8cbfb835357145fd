use actix_web::{web, HttpRequest, HttpResponse};
use crate::error::ApiError;
use crate::models::{BookingForm, Category, Listing, RegistrationForm};
use crate::routes::directory::parse_category;
use crate::routes::{bearer_token, AppState};
use crate::services::Caller;

/// Configure registration and booking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/kindergartens/{id}/registrations", web::post().to(submit_registration))
        .route("/{category}/{id}/bookings", web::post().to(submit_booking));
}

/// Signed-in caller, checked before the listing is looked up
async fn signed_in_caller(state: &AppState, req: &HttpRequest) -> Result<Caller, ApiError> {
    state
        .auth
        .caller(bearer_token(req))
        .await?
        .ok_or(ApiError::LoginRequired)
}

async fn find_listing(state: &AppState, category: Category, id: &str) -> Result<Listing, ApiError> {
    state
        .directory
        .listing(category, id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("No {} listing with id {}", category.slug(), id)))
}

/// Registration request for a kindergarten
///
/// POST /api/v1/kindergartens/{id}/registrations
///
/// Requires `Authorization: Bearer <access token>`. Request body:
/// ```json
/// {
///   "parentName": "string",
///   "phone": "string",
///   "email": "string?",
///   "childName": "string",
///   "childAge": 4,
///   "message": "string?"
/// }
/// ```
async fn submit_registration(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<RegistrationForm>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let caller = signed_in_caller(&state, &req).await?;
    let listing = find_listing(&state, Category::Kindergarten, &path).await?;
    let ack = state.submissions.register(Some(&caller), &listing, form.into_inner()).await?;

    Ok(HttpResponse::Created().json(ack))
}

/// Booking request for a kindergarten visit or a practitioner appointment
///
/// POST /api/v1/{category}/{id}/bookings
///
/// Same body as a registration plus `"preferredDate": "YYYY-MM-DD"`.
async fn submit_booking(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    form: web::Json<BookingForm>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let (slug, id) = path.into_inner();
    let category = parse_category(&slug)?;
    let caller = signed_in_caller(&state, &req).await?;
    let listing = find_listing(&state, category, &id).await?;
    let ack = state.submissions.book(Some(&caller), &listing, form.into_inner()).await?;

    Ok(HttpResponse::Created().json(ack))
}
