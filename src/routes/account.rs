use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::catalog;
use crate::error::ApiError;
use crate::models::{
    AdminOverviewResponse, AppRole, Category, CategoryCount, LangQuery, ListingCard, OwnerDashboardResponse,
    RecoveryRequest, SignInRequest, SignUpRequest,
};
use crate::routes::directory::parse_lang;
use crate::routes::{bearer_token, AppState};
use crate::services::parse_recovery_fragment;

/// Configure authentication and role-gated routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/auth/sign-in", web::post().to(sign_in))
        .route("/auth/sign-up", web::post().to(sign_up))
        .route("/auth/sign-out", web::post().to(sign_out))
        .route("/auth/session", web::get().to(current_session))
        .route("/auth/recovery", web::post().to(recover_password))
        .route("/owner/dashboard", web::get().to(owner_dashboard))
        .route("/admin/overview", web::get().to(admin_overview));
}

/// POST /api/v1/auth/sign-in
async fn sign_in(state: web::Data<AppState>, req: web::Json<SignInRequest>) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    match state.supabase.sign_in(req.email.trim(), &req.password).await {
        Ok(session) => {
            tracing::info!("User {} signed in", session.user.id);
            Ok(HttpResponse::Ok().json(session))
        }
        Err(crate::services::SupabaseError::Unauthorized) => {
            Err(ApiError::InvalidSession("invalid email or password".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Create an account and its profile side-record
///
/// POST /api/v1/auth/sign-up
async fn sign_up(state: web::Data<AppState>, req: web::Json<SignUpRequest>) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let (user, session) = state
        .supabase
        .sign_up(req.email.trim(), &req.password, req.full_name.trim())
        .await?;

    // Without a session (email confirmation pending) row-level security
    // rejects the insert, so the profile is only written when signed in
    if let Some(session) = &session {
        if let Err(e) = state
            .supabase
            .insert_profile(&user.id, req.full_name.trim(), req.phone.as_deref(), &session.access_token)
            .await
        {
            tracing::warn!("Signed up {} but failed to create the profile: {}", user.id, e);
        }
    }

    tracing::info!("User {} signed up (confirmation pending: {})", user.id, session.is_none());

    Ok(HttpResponse::Created().json(json!({
        "user": user,
        "session": session,
        "confirmationRequired": session.is_none(),
    })))
}

/// POST /api/v1/auth/sign-out
async fn sign_out(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let token = bearer_token(&req).ok_or(ApiError::LoginRequired)?;
    state.supabase.sign_out(token).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/auth/session
async fn current_session(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let user = state.auth.require_user(bearer_token(&req)).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Finish a password recovery from the link the user followed
///
/// POST /api/v1/auth/recovery
///
/// Request body:
/// ```json
/// {
///   "fragment": "#access_token=...&refresh_token=...&type=recovery",
///   "newPassword": "string"
/// }
/// ```
async fn recover_password(
    state: web::Data<AppState>,
    req: web::Json<RecoveryRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let tokens = parse_recovery_fragment(&req.fragment)?;
    let user = state
        .supabase
        .update_password(&tokens.access_token, &req.new_password)
        .await?;

    tracing::info!("Password recovered for user {}", user.id);
    Ok(HttpResponse::Ok().json(user))
}

/// Kindergartens owned by the signed-in owner
///
/// GET /api/v1/owner/dashboard?lang=ar
async fn owner_dashboard(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<LangQuery>,
) -> Result<HttpResponse, ApiError> {
    let lang = parse_lang(query.lang.as_deref())?;
    let token = bearer_token(&req);
    let user = state.auth.require_role(token, AppRole::Owner).await?;

    let owned = state
        .supabase
        .fetch_owned_kindergartens(&user.id, token.unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(OwnerDashboardResponse {
        kindergartens: owned.iter().map(|l| ListingCard::localized(l, lang)).collect(),
        user,
    }))
}

/// Listing counts per directory
///
/// GET /api/v1/admin/overview
async fn admin_overview(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    state.auth.require_role(bearer_token(&req), AppRole::Admin).await?;

    let (kindergarten_source, kindergartens) = state.directory.listings(Category::Kindergarten).await;

    let counts = Category::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: match category {
                Category::Kindergarten => kindergartens.len(),
                other => catalog::listings(other).len(),
            },
        })
        .collect();

    Ok(HttpResponse::Ok().json(AdminOverviewResponse {
        counts,
        kindergarten_source,
        cached_entries: state.directory.cache().stats().entries,
    }))
}
