//! JWT authentication middleware.
//!
//! Resolves the bearer token into a `Caller` backed by the current user row,
//! so a deleted user's token stops working and `is_admin` is never trusted
//! from the token itself.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::services::Caller;
use crate::state::AppState;
use crate::utils::jwt::validate_access_token;

fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
    })
}

/// Inserts the authenticated `Caller` into request extensions.
///
/// # Errors
/// Returns 401 Unauthorized if the header is missing or malformed, the token
/// is invalid or expired, or the user no longer exists.
///
/// # Example
/// ```ignore
/// protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = validate_access_token(bearer_token(&request)?, &state.jwt_config.secret)?;
    let user_id = claims.user_id()?;

    let user = match state.services.users.verify_id_and_return_user(user_id).await {
        Ok(user) => user,
        Err(AppError::NotFound { .. }) => {
            return Err(AppError::unauthorized("User no longer exists"));
        }
        Err(e) => return Err(e),
    };

    request.extensions_mut().insert(Caller::from(&user));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(header_value: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        let request = request_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&request).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_or_malformed_header() {
        assert!(matches!(
            bearer_token(&request_with(None)),
            Err(AppError::Unauthorized { .. })
        ));
        assert!(matches!(
            bearer_token(&request_with(Some("Basic dXNlcjpwYXNz"))),
            Err(AppError::Unauthorized { .. })
        ));
    }
}
