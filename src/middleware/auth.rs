use crate::{auth::verify_jwt, error::AppError, state::AppState, user::UserId};
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = if let Some(auth_header) = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?
            .to_string()
    } else {
        // Browsers cannot set headers on a WebSocket upgrade, so accept ?token= as well
        let query = req.uri().query().unwrap_or("");
        query
            .split('&')
            .find_map(|p| p.strip_prefix("token="))
            .map(str::to_string)
            .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?
    };

    let claims = verify_jwt(&token, &state.config.jwt_secret)?;

    let user_id: UserId = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

    state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::Unauthorized("User not found".to_string()))?;

    req.extensions_mut().insert(AuthUser(user_id));

    Ok(next.run(req).await)
}

/// Authenticated caller, inserted into request extensions by [`auth_middleware`].
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))
    }
}
