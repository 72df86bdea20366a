use super::types::{request, response};
use crate::{
    modules::order::{
        repository::{OrderActor, OrderStatus},
        service as order_service,
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let user = payload.auth.user;
    let access = order_service::access(&ctx, &user, payload.id)
        .await
        .map_err(response::Error::FailedToCancelOrder)?;

    let reason = payload
        .body
        .reason
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or_else(|| {
            let by = match access.actor {
                OrderActor::Customer => "customer",
                OrderActor::Restaurant => "restaurant",
                OrderActor::DeliveryPartner => "delivery partner",
                OrderActor::Admin => "admin",
                OrderActor::System => "system",
            };
            format!("Cancelled by {}", by)
        });

    order_service::transition(
        &ctx,
        access.order,
        &access.restaurant,
        order_service::Transition {
            actor: access.actor,
            actor_id: Some(user.id),
            to: OrderStatus::Cancelled,
            cancellation_reason: Some(reason),
        },
    )
    .await
    .map_err(response::Error::FailedToCancelOrder)
    .map(response::Success::OrderCancelled)
}
