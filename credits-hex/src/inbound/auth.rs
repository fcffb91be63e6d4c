//! Authentication middleware for bearer credentials.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use credits_types::{AuthError, IdentityVerifier, PaymentGateway, UserId, WalletStore};

use super::handlers::AppState;

/// Extracts the bearer credential from the Authorization header.
/// Expected format: "Bearer <token>" or just "<token>"
fn extract_bearer(auth_header: Option<&str>) -> Option<&str> {
    let header = auth_header?;
    if header.starts_with("Bearer ") {
        Some(header.strip_prefix("Bearer ").unwrap())
    } else {
        Some(header)
    }
}

/// Paths served without a bearer credential: the health check, API docs,
/// and the webhook route (authenticated by its own signature header).
fn is_public(path: &str) -> bool {
    path == "/"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || path.starts_with("/webhook/")
}

/// Authentication middleware that resolves the wallet owner.
///
/// This middleware:
/// 1. Extracts the bearer credential from the Authorization header
/// 2. Resolves it to a `UserId` through the `IdentityVerifier` port
/// 3. Stores the id in request extensions for the handlers
/// 4. Returns 401 Unauthorized if resolution fails
pub async fn auth_middleware<S: WalletStore, G: PaymentGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match extract_bearer(auth_header) {
        Some(token) if !token.is_empty() => token,
        _ => return unauthorized_response("Access token required"),
    };

    match state.identity.verify(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::InvalidCredential) => unauthorized_response("Invalid token"),
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Development trust model: the bearer credential is taken verbatim as
/// the user identifier.
///
/// Real deployments swap in a verifier that checks a signed identity
/// token and derives the user id from its verified claims.
pub struct TrustedTokenVerifier;

#[async_trait::async_trait]
impl IdentityVerifier for TrustedTokenVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        UserId::new(token).map_err(|_| AuthError::InvalidCredential)
    }
}
