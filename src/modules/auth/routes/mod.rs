mod sign_in;

use crate::types::{AppEnvironment, Context};
use axum::routing::Router;
use std::sync::Arc;

/// Only development builds can mint sessions; production sign-in is handled
/// outside this service.
pub fn get_router(environment: &AppEnvironment) -> Router<Arc<Context>> {
    match environment {
        AppEnvironment::Development => Router::new().nest("/dev/sign-in", sign_in::get_router()),
        AppEnvironment::Production => Router::new(),
    }
}
