mod cancel;
mod checkout;
mod confirm_payment;
mod deliveries;
mod get;
mod list;
mod update_status;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub use deliveries::get_router as get_deliveries_router;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(checkout::get_router())
        .merge(list::get_router())
        .merge(get::get_router())
        .merge(update_status::get_router())
        .merge(cancel::get_router())
        .merge(confirm_payment::get_router())
}
