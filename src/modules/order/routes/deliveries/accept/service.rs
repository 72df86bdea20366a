use super::types::{request, response};
use crate::{
    modules::{
        notification::{
            self,
            service::{EventKind, OrderEvent},
        },
        order::repository::{self, OrderStatus},
        restaurant, user,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let partner = payload.auth.user;
    if !user::repository::is_delivery_partner(&partner) {
        return Err(response::Error::NotADeliveryPartner);
    }

    let order = repository::find_by_id(&ctx.db_conn.pool, payload.order_id)
        .await
        .map_err(|_| response::Error::FailedToAcceptDelivery)?
        .ok_or(response::Error::OrderNotFound)?;

    if order.delivery_partner_id.is_some() {
        return Err(response::Error::AlreadyAssigned);
    }

    if !matches!(
        order.status,
        OrderStatus::Confirmed | OrderStatus::Preparing | OrderStatus::Ready
    ) {
        return Err(response::Error::NotAssignable);
    }

    let order = repository::assign_delivery_partner(&ctx.db_conn.pool, order.id, partner.id.clone())
        .await
        .map_err(|_| response::Error::FailedToAcceptDelivery)?
        .ok_or(response::Error::AlreadyAssigned)?;

    tracing::info!(
        "Order {} assigned to delivery partner {}",
        order.id,
        partner.id
    );

    match restaurant::repository::find_by_id(&ctx.db_conn.pool, order.restaurant_id.clone()).await
    {
        Ok(Some(restaurant)) => notification::service::send(
            &ctx,
            OrderEvent::new(EventKind::PartnerAssigned, &order, restaurant.owner_id),
        ),
        _ => tracing::warn!(
            "Could not notify restaurant of order {} about its delivery partner",
            order.id
        ),
    }

    Ok(response::Success::DeliveryAccepted(order))
}
