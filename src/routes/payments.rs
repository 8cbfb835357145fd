use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::error::ApiError;
use crate::models::{Category, StartPaymentRequest};
use crate::routes::AppState;

/// Configure payment simulation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/payments/simulations", web::post().to(start_simulation))
        .route("/payments/simulations/{id}", web::get().to(get_simulation));
}

/// Start a simulated card payment of kindergarten fees
///
/// POST /api/v1/payments/simulations
///
/// Request body:
/// ```json
/// {
///   "listingId": "kg-1",
///   "amount": 4500,
///   "method": "edahabia"
/// }
/// ```
///
/// No money moves: the returned id is polled until the phase reads `success`.
async fn start_simulation(
    state: web::Data<AppState>,
    req: web::Json<StartPaymentRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    if state.directory.listing(Category::Kindergarten, &req.listing_id).await.is_none() {
        return Err(ApiError::NotFound(format!("No kindergarten with id {}", req.listing_id)));
    }

    let simulation = state.payments.start(&req.listing_id, req.amount, req.method).await?;
    Ok(HttpResponse::Created().json(simulation))
}

/// GET /api/v1/payments/simulations/{id}
async fn get_simulation(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let simulation = state
        .payments
        .get(&path)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("No payment simulation with id {}", path.as_str())))?;

    Ok(HttpResponse::Ok().json(simulation))
}
