//! Authentication middleware and the current-user extractor.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use sandgate_auth::{AuthRequest, User};
use tracing::debug;

use crate::error::ServerError;
use crate::state::AppState;

/// Run the configured authenticator and attach the resulting [`User`] to the
/// request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let policy = state.policy.get();
    let fields = policy.request_fields(request.headers());

    let user = state
        .auth
        .authenticate(
            AuthRequest::new(request.headers(), &fields),
            state.store.as_ref(),
            &policy.settings,
            &policy.server,
        )
        .await?;

    debug!(username = %user.username, id = user.id, path = %request.uri().path(), "request authenticated");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extractor for the user attached by [`authenticate`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or(ServerError::Unauthenticated)
    }
}
