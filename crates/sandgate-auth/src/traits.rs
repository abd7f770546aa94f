//! Authenticator trait.

use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderMap;

use crate::error::AuthError;
use crate::fields::TrustedFields;
use crate::store::UserStore;
use crate::users::{AuthMethod, ServerSettings, Settings, User};

/// The parts of an HTTP request an authenticator may look at.
#[derive(Debug, Clone, Copy)]
pub struct AuthRequest<'a> {
    /// Request headers.
    pub headers: &'a HeaderMap,
    /// Trusted fields populated by the hosting layer for this request.
    pub fields: &'a TrustedFields,
}

impl<'a> AuthRequest<'a> {
    #[inline]
    pub fn new(headers: &'a HeaderMap, fields: &'a TrustedFields) -> Self {
        Self { headers, fields }
    }
}

/// An authentication strategy.
///
/// Settings and server settings are passed on every call so that an
/// authenticator never holds request state and can be shared across
/// concurrent requests.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve the user behind `request`.
    async fn authenticate(
        &self,
        request: AuthRequest<'_>,
        store: &dyn UserStore,
        settings: &Settings,
        server: &ServerSettings,
    ) -> Result<User, AuthError>;

    /// Whether the hosting router must show a login page for this method.
    fn requires_login_page(&self) -> bool;

    /// The method this authenticator implements.
    fn method(&self) -> AuthMethod;
}

/// Blanket implementation for `Arc<A>` where `A: Authenticator`.
#[async_trait]
impl<A: Authenticator + ?Sized> Authenticator for Arc<A> {
    #[inline]
    async fn authenticate(
        &self,
        request: AuthRequest<'_>,
        store: &dyn UserStore,
        settings: &Settings,
        server: &ServerSettings,
    ) -> Result<User, AuthError> {
        (**self).authenticate(request, store, settings, server).await
    }

    #[inline]
    fn requires_login_page(&self) -> bool {
        (**self).requires_login_page()
    }

    #[inline]
    fn method(&self) -> AuthMethod {
        (**self).method()
    }
}
