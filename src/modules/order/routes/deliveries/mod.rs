mod accept;
mod available;
mod mine;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

/// Mounted under `/deliveries`.
pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(available::get_router())
        .merge(accept::get_router())
        .merge(mine::get_router())
}
