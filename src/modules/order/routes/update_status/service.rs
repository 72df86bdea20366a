use super::types::{request, response};
use crate::{modules::order::service as order_service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = payload.auth.user;
    let access = order_service::access(&ctx, &user, payload.id)
        .await
        .map_err(response::Error::FailedToUpdateOrderStatus)?;

    order_service::transition(
        &ctx,
        access.order,
        &access.restaurant,
        order_service::Transition {
            actor: access.actor,
            actor_id: Some(user.id),
            to: payload.body.status,
            cancellation_reason: None,
        },
    )
    .await
    .map_err(response::Error::FailedToUpdateOrderStatus)
    .map(response::Success::OrderStatusUpdated)
}
