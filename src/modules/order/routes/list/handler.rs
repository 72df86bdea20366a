use super::{service::service, types::request};
use crate::{modules::auth::middleware::Auth, types::Context, utils::pagination::Pagination};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    auth: Auth,
    pagination: Pagination,
    Query(query): Query<request::Query>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            pagination,
            query,
            auth,
        },
    )
    .await
}
