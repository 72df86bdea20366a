use super::types::{request, response};
use crate::{
    modules::order::{repository, service as order_service},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let access = order_service::access(&ctx, &payload.auth.user, payload.id)
        .await
        .map_err(response::Error::OrderNotAccessible)?;

    let history = repository::find_status_updates_by_order_id(&ctx.db_conn.pool, access.order.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchOrder)?;

    Ok(response::Success::Order(response::OrderWithHistory {
        order: access.order,
        restaurant_name: access.restaurant.name,
        history,
    }))
}
