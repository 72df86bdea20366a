mod delivery_fee;
mod delivery_tiers;
mod quote;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(delivery_tiers::get_router())
        .merge(delivery_fee::get_router())
        .merge(quote::get_router())
}
