//! API routes for the LRI server.

pub mod error;
pub mod grid;
pub mod map;
pub mod request_id;
mod routes;
pub mod scenarios;
pub mod score;

use crate::config::Config;
use axum::Router;

pub use routes::cors_layer;

pub fn routes(config: &Config) -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router(config)
}

#[cfg(test)]
mod tests;
