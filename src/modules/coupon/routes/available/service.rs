use super::types::{request, response};
use crate::{modules::coupon::repository, types::Context};
use chrono::Utc;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_available(
        &ctx.db_conn.pool,
        payload.query.restaurant_id,
        Utc::now().naive_utc(),
    )
    .await
    .map_err(|_| response::Error::FailedToFetchCoupons)
    .map(response::Success::Coupons)
}
