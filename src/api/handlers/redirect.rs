//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Validate the code shape; malformed codes are rejected with 404 before
///    any storage round-trip, so junk paths never consume a pooled connection.
/// 2. Look up the link.
/// 3. Record the visit (best-effort; a failure is logged and the redirect
///    still proceeds).
/// 4. Respond `302 Found` with the target URL in `Location`.
///
/// The lookup and the increment are two separate statements, not a
/// transaction. A delete racing a redirect can make the increment a no-op;
/// that is accepted. The increment itself is atomic at the storage layer, so
/// concurrent redirects all count.
///
/// # Errors
///
/// Returns 404 when the code is malformed or unknown.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !is_valid_code(&code) {
        return Err(AppError::not_found("Link not found"));
    }

    let link = state.link_service.get_link(&code).await?;

    if let Err(e) = state.link_service.record_visit(&code).await {
        warn!(code = %code, error = %e, "failed to record visit");
    }

    // axum's Redirect helpers emit 303/307/308; this endpoint is a plain 302.
    Ok((StatusCode::FOUND, [(header::LOCATION, link.url)]).into_response())
}
