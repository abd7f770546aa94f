//! Sandgate HTTP server.
//!
//! Hosts [`sandgate_auth::SandstormAuth`] behind axum: every `/api` request
//! is authenticated from the proxy headers and the resolved user is available
//! to handlers through [`CurrentUser`].

mod auth;
pub mod cli;
mod error;
mod policy;
mod routes;
mod server;
mod state;

pub use auth::{CurrentUser, authenticate};
pub use cli::ServerArgs;
pub use error::ServerError;
pub use policy::{AuthPolicy, ReloadablePolicy};
pub use routes::router;
pub use server::{bind, run, run_with_shutdown, serve};
pub use state::AppState;
pub use tokio_util::sync::CancellationToken;
