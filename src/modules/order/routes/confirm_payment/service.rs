use super::types::{request, response};
use crate::{
    modules::{
        notification::{
            self,
            service::{EventKind, OrderEvent},
        },
        order::repository::{self, OrderStatus, PaymentMethod, PaymentStatus},
        restaurant,
    },
    types::Context,
};
use std::sync::Arc;

/// Records an online payment. Stands in for the payment gateway callback.
pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let order = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToConfirmPayment)?
        .ok_or(response::Error::OrderNotFound)?;

    if order.payment_method != PaymentMethod::Online {
        return Err(response::Error::NotAnOnlinePayment);
    }

    if order.status == OrderStatus::Cancelled {
        return Err(response::Error::OrderCancelled);
    }

    if order.payment_status != PaymentStatus::Pending {
        return Err(response::Error::AlreadyPaid);
    }

    let restaurant =
        restaurant::repository::find_by_id(&ctx.db_conn.pool, order.restaurant_id.clone())
            .await
            .map_err(|_| response::Error::FailedToConfirmPayment)?
            .ok_or(response::Error::FailedToConfirmPayment)?;

    let order = repository::update_payment_status(
        &ctx.db_conn.pool,
        order.id,
        PaymentStatus::Pending,
        PaymentStatus::Paid,
    )
    .await
    .map_err(|_| response::Error::FailedToConfirmPayment)?
    .ok_or(response::Error::AlreadyPaid)?;

    tracing::info!(
        "Payment for order {} confirmed by admin {}",
        order.id,
        payload.auth.user.id
    );

    notification::service::send(
        &ctx,
        OrderEvent::new(EventKind::PaymentUpdated, &order, restaurant.owner_id),
    );

    Ok(response::Success::PaymentConfirmed(order))
}
