use actix_web::{web, HttpResponse};
use crate::core::{catalog, search, ListingFilter};
use crate::error::ApiError;
use crate::models::{
    Category, HealthResponse, LangQuery, Language, ListingCard, ListingDetail, ListingQuery, ListingsResponse,
    LookupView,
};
use crate::routes::AppState;

/// Configure health, reference and directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/reference/{table}", web::get().to(reference_table))
        .route("/{category}", web::get().to(list_listings))
        .route("/{category}/{id}", web::get().to(listing_detail))
        .route("/{category}/{id}/reviews", web::get().to(listing_reviews));
}

/// Requested display language, French when absent
pub fn parse_lang(lang: Option<&str>) -> Result<Language, ApiError> {
    match lang {
        None => Ok(Language::default()),
        Some(code) => code.parse().map_err(ApiError::Validation),
    }
}

pub fn parse_category(slug: &str) -> Result<Category, ApiError> {
    Category::from_slug(slug).ok_or_else(|| ApiError::NotFound(format!("Unknown directory: {}", slug)))
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Lookup tables
///
/// GET /api/v1/reference/{municipalities|services|activities}?lang=ar
async fn reference_table(
    path: web::Path<String>,
    query: web::Query<LangQuery>,
) -> Result<HttpResponse, ApiError> {
    let lang = parse_lang(query.lang.as_deref())?;

    let entries = match path.as_str() {
        "municipalities" => catalog::municipalities(),
        "services" => catalog::services(),
        "activities" => catalog::activities(),
        other => return Err(ApiError::NotFound(format!("Unknown reference table: {}", other))),
    };

    let views: Vec<LookupView> = entries.iter().map(|e| LookupView::localized(e, lang)).collect();
    Ok(HttpResponse::Ok().json(views))
}

/// Directory listing with filters
///
/// GET /api/v1/{category}?search=&municipality=&min_price=&max_price=&services=a,b&activities=&autism_wing=&lang=
async fn list_listings(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ListingQuery>,
) -> Result<HttpResponse, ApiError> {
    let category = parse_category(&path)?;
    let lang = parse_lang(query.lang.as_deref())?;
    let filter = ListingFilter::from_query(&query)?;

    let (source, listings) = state.directory.listings(category).await;
    let result = search(&listings, &filter);

    tracing::info!(
        "Directory {}: {} of {} listings match (source: {:?})",
        category.slug(),
        result.matched(),
        result.total,
        source
    );

    Ok(HttpResponse::Ok().json(ListingsResponse {
        matched: result.matched(),
        total: result.total,
        listings: result.listings.into_iter().map(|l| ListingCard::localized(l, lang)).collect(),
        source,
        lang,
    }))
}

/// Listing detail
///
/// GET /api/v1/{category}/{id}?lang=en
async fn listing_detail(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<LangQuery>,
) -> Result<HttpResponse, ApiError> {
    let (slug, id) = path.into_inner();
    let category = parse_category(&slug)?;
    let lang = parse_lang(query.lang.as_deref())?;

    let listing = state
        .directory
        .listing(category, &id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("No {} listing with id {}", category.slug(), id)))?;

    Ok(HttpResponse::Ok().json(ListingDetail::localized(&listing, lang)))
}

/// Read-only reviews of a listing, newest first
///
/// GET /api/v1/{category}/{id}/reviews
async fn listing_reviews(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (slug, id) = path.into_inner();
    let category = parse_category(&slug)?;

    if state.directory.listing(category, &id).await.is_none() {
        return Err(ApiError::NotFound(format!("No {} listing with id {}", category.slug(), id)));
    }

    if category != Category::Kindergarten {
        return Ok(HttpResponse::Ok().json(Vec::<crate::models::Review>::new()));
    }

    let reviews = state.supabase.fetch_reviews(&id).await?;
    Ok(HttpResponse::Ok().json(reviews))
}
