//! Order lifecycle rules.

use super::repository::{
    self, Order, OrderActor, OrderItem, OrderStatus, PaymentMethod, PaymentStatus,
};
use crate::{
    modules::{
        cart, coupon,
        notification::{
            self,
            service::{EventKind, OrderEvent},
        },
        pricing::service::CartQuote,
        restaurant::{self, repository::Restaurant},
        user::{self, repository::User},
    },
    types::Context,
    utils::geo::Coordinates,
};
use axum::{extract::Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

#[derive(Debug, PartialEq)]
pub enum Error {
    OrderNotFound,
    Forbidden,
    AlreadyFinished,
    InvalidTransition,
    DeliveryPartnerRequired,
    /// The order changed while the transition was being applied.
    Conflict,
    UnexpectedError,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            Self::OrderNotFound => (StatusCode::NOT_FOUND, "Order not found"),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "You are not allowed to act on this order",
            ),
            Self::AlreadyFinished => (StatusCode::BAD_REQUEST, "Order is already finished"),
            Self::InvalidTransition => (
                StatusCode::BAD_REQUEST,
                "Invalid status transition for this order",
            ),
            Self::DeliveryPartnerRequired => (
                StatusCode::BAD_REQUEST,
                "Order has no delivery partner assigned",
            ),
            Self::Conflict => (
                StatusCode::CONFLICT,
                "Order was updated by someone else, please retry",
            ),
            Self::UnexpectedError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update order",
            ),
        };

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// How `user` relates to `order`. Several relationships can hold at once;
/// the most privileged one wins.
pub fn actor_for(user: &User, order: &Order, restaurant: &Restaurant) -> Option<OrderActor> {
    if user::repository::is_admin(user) {
        return Some(OrderActor::Admin);
    }

    if restaurant::repository::is_owner(user, restaurant) && restaurant.id == order.restaurant_id {
        return Some(OrderActor::Restaurant);
    }

    if order.delivery_partner_id.as_deref() == Some(user.id.as_str()) {
        return Some(OrderActor::DeliveryPartner);
    }

    if order.owner_id == user.id {
        return Some(OrderActor::Customer);
    }

    None
}

pub fn can_transition(actor: OrderActor, from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    if from.is_terminal() {
        return false;
    }

    match actor {
        OrderActor::Customer => matches!((from, to), (Pending, Cancelled)),
        OrderActor::Restaurant => matches!(
            (from, to),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Preparing)
                | (Confirmed, Cancelled)
                | (Preparing, Ready)
        ),
        OrderActor::DeliveryPartner => {
            matches!((from, to), (Ready, OutForDelivery) | (OutForDelivery, Delivered))
        }
        OrderActor::Admin => to == Cancelled || from.next() == Some(to),
        OrderActor::System => matches!((from, to), (Pending, Cancelled)),
    }
}

/// Payment status implied by moving `order` to `to`, if it changes.
pub fn payment_status_after(order: &Order, to: OrderStatus) -> Option<PaymentStatus> {
    match (to, order.payment_method, order.payment_status) {
        (OrderStatus::Delivered, PaymentMethod::CashOnDelivery, PaymentStatus::Pending) => {
            Some(PaymentStatus::Paid)
        }
        (OrderStatus::Cancelled, _, PaymentStatus::Paid) => Some(PaymentStatus::Refunded),
        _ => None,
    }
}

/// Checks whether `actor` may move `order` to `to`.
pub fn check_transition(actor: OrderActor, order: &Order, to: OrderStatus) -> Result<(), Error> {
    if order.status.is_terminal() {
        return Err(Error::AlreadyFinished);
    }

    if !can_transition(actor, order.status, to) {
        return Err(Error::InvalidTransition);
    }

    if to == OrderStatus::OutForDelivery && order.delivery_partner_id.is_none() {
        return Err(Error::DeliveryPartnerRequired);
    }

    Ok(())
}

pub struct OrderAccess {
    pub order: Order,
    pub restaurant: Restaurant,
    pub actor: OrderActor,
}

/// Loads the order together with the role the caller plays in it.
pub async fn access(ctx: &Context, user: &User, order_id: String) -> Result<OrderAccess, Error> {
    let order = repository::find_by_id(&ctx.db_conn.pool, order_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::OrderNotFound)?;

    let restaurant = restaurant::repository::find_by_id(&ctx.db_conn.pool, order.restaurant_id.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::UnexpectedError)?;

    let actor = actor_for(user, &order, &restaurant).ok_or(Error::Forbidden)?;

    Ok(OrderAccess {
        order,
        restaurant,
        actor,
    })
}

pub struct Transition {
    pub actor: OrderActor,
    pub actor_id: Option<String>,
    pub to: OrderStatus,
    pub cancellation_reason: Option<String>,
}

/// Applies a status change, records it in the order history and notifies
/// the parties of the order.
pub async fn transition(
    ctx: &Context,
    order: Order,
    restaurant: &Restaurant,
    payload: Transition,
) -> Result<Order, Error> {
    check_transition(payload.actor, &order, payload.to)?;

    let cancellation_reason = match payload.to {
        OrderStatus::Cancelled => payload.cancellation_reason,
        _ => None,
    };

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        Error::UnexpectedError
    })?;

    let updated = repository::update_status(
        &mut *tx,
        order.id.clone(),
        repository::UpdateStatusPayload {
            from: order.status,
            to: payload.to,
            payment_status: payment_status_after(&order, payload.to),
            cancellation_reason,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?
    .ok_or(Error::Conflict)?;

    repository::create_status_update(
        &mut *tx,
        repository::CreateStatusUpdatePayload {
            order_id: updated.id.clone(),
            status: updated.status,
            actor: payload.actor,
            actor_id: payload.actor_id,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        Error::UnexpectedError
    })?;

    tracing::info!(
        "Order {} moved from {} to {} by {:?}",
        updated.id,
        order.status.to_string(),
        updated.status.to_string(),
        payload.actor
    );

    notification::service::send(
        ctx,
        OrderEvent::new(EventKind::StatusChanged, &updated, restaurant.owner_id.clone()),
    );

    Ok(updated)
}

pub struct Checkout {
    pub customer_id: String,
    pub payment_method: PaymentMethod,
    pub delivery_address: String,
    pub destination: Coordinates,
    pub note: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckoutError {
    /// The coupon's last use was taken after the cart was quoted.
    CouponExhausted,
    UnexpectedError,
}

/// Turns a quoted cart into a `PENDING` order. The coupon use, the order, its
/// first history row and the emptied cart are written in one transaction.
pub async fn place_order(
    ctx: &Context,
    cart_quote: CartQuote,
    checkout: Checkout,
) -> Result<Order, CheckoutError> {
    let items = cart_quote
        .priced
        .lines
        .iter()
        .map(|line| OrderItem {
            menu_item_id: line.menu_item.id.clone(),
            name: line.menu_item.name.clone(),
            price: line.menu_item.price.clone(),
            quantity: line.quantity,
            line_total: line.line_total.clone(),
        })
        .collect::<Vec<_>>();

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        CheckoutError::UnexpectedError
    })?;

    if let Some(coupon) = &cart_quote.coupon {
        coupon::repository::consume_usage(&mut *tx, coupon.id.clone())
            .await
            .map_err(|_| CheckoutError::UnexpectedError)?
            .ok_or(CheckoutError::CouponExhausted)?;
    }

    let quote = cart_quote.quote;
    let order = repository::create(
        &mut *tx,
        repository::CreateOrderPayload {
            payment_method: checkout.payment_method,
            items,
            sub_total: quote.sub_total,
            discount: quote.discount,
            delivery_fee: quote.delivery_fee,
            tax: quote.tax,
            total: quote.total,
            distance_km: quote.distance_km,
            coupon_code: cart_quote.coupon.map(|coupon| coupon.code),
            delivery_address: checkout.delivery_address,
            delivery_latitude: checkout.destination.latitude,
            delivery_longitude: checkout.destination.longitude,
            note: checkout.note.unwrap_or_default(),
            restaurant_id: cart_quote.restaurant.id.clone(),
            owner_id: checkout.customer_id.clone(),
        },
    )
    .await
    .map_err(|_| CheckoutError::UnexpectedError)?;

    repository::create_status_update(
        &mut *tx,
        repository::CreateStatusUpdatePayload {
            order_id: order.id.clone(),
            status: OrderStatus::Pending,
            actor: OrderActor::Customer,
            actor_id: Some(checkout.customer_id.clone()),
        },
    )
    .await
    .map_err(|_| CheckoutError::UnexpectedError)?;

    cart::repository::clear_by_owner_id(&mut *tx, checkout.customer_id)
        .await
        .map_err(|_| CheckoutError::UnexpectedError)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        CheckoutError::UnexpectedError
    })?;

    tracing::info!(
        "Order {} placed at restaurant {} for {}",
        order.id,
        order.restaurant_id,
        order.total
    );

    notification::service::send(
        ctx,
        OrderEvent::new(EventKind::OrderPlaced, &order, cart_quote.restaurant.owner_id),
    );

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{
        order::repository::fixtures::order,
        restaurant::repository::fixtures::restaurant,
        user::repository::{fixtures::user, Role},
    };
    use OrderStatus::*;

    const ALL: [OrderStatus; 7] = [
        Pending,
        Confirmed,
        Preparing,
        Ready,
        OutForDelivery,
        Delivered,
        Cancelled,
    ];

    fn allowed(actor: OrderActor) -> Vec<(OrderStatus, OrderStatus)> {
        let mut pairs = vec![];
        for from in ALL {
            for to in ALL {
                if can_transition(actor, from, to) {
                    pairs.push((from, to));
                }
            }
        }
        pairs
    }

    #[test]
    fn customers_can_only_cancel_pending_orders() {
        assert_eq!(allowed(OrderActor::Customer), vec![(Pending, Cancelled)]);
    }

    #[test]
    fn restaurants_drive_the_kitchen_steps() {
        assert_eq!(
            allowed(OrderActor::Restaurant),
            vec![
                (Pending, Confirmed),
                (Pending, Cancelled),
                (Confirmed, Preparing),
                (Confirmed, Cancelled),
                (Preparing, Ready),
            ]
        );
    }

    #[test]
    fn delivery_partners_drive_the_delivery_steps() {
        assert_eq!(
            allowed(OrderActor::DeliveryPartner),
            vec![(Ready, OutForDelivery), (OutForDelivery, Delivered)]
        );
    }

    #[test]
    fn admins_advance_one_step_or_cancel() {
        let pairs = allowed(OrderActor::Admin);

        assert!(pairs.contains(&(Pending, Confirmed)));
        assert!(pairs.contains(&(OutForDelivery, Delivered)));
        assert!(pairs.contains(&(OutForDelivery, Cancelled)));
        assert!(!pairs.contains(&(Pending, Ready)));
        assert!(!pairs.contains(&(Ready, Preparing)));
        assert_eq!(pairs.len(), 10);
    }

    #[test]
    fn the_system_only_expires_pending_orders() {
        assert_eq!(allowed(OrderActor::System), vec![(Pending, Cancelled)]);
    }

    #[test]
    fn terminal_orders_never_move() {
        for actor in [
            OrderActor::Customer,
            OrderActor::Restaurant,
            OrderActor::DeliveryPartner,
            OrderActor::Admin,
            OrderActor::System,
        ] {
            for to in ALL {
                assert!(!can_transition(actor, Delivered, to));
                assert!(!can_transition(actor, Cancelled, to));
            }
        }
    }

    #[test]
    fn derives_the_most_privileged_actor() {
        let diner = user("diner", Role::Customer);
        let owner = user("owner", Role::RestaurantOwner);
        let rider = user("rider", Role::DeliveryPartner);
        let admin = user("admin", Role::Admin);
        let stranger = user("stranger", Role::Customer);

        let restaurant = restaurant("r1", "owner");
        let mut assigned = order("o1", "diner", "r1");
        assigned.delivery_partner_id = Some(String::from("rider"));

        assert_eq!(actor_for(&diner, &assigned, &restaurant), Some(OrderActor::Customer));
        assert_eq!(actor_for(&owner, &assigned, &restaurant), Some(OrderActor::Restaurant));
        assert_eq!(
            actor_for(&rider, &assigned, &restaurant),
            Some(OrderActor::DeliveryPartner)
        );
        assert_eq!(actor_for(&admin, &assigned, &restaurant), Some(OrderActor::Admin));
        assert_eq!(actor_for(&stranger, &assigned, &restaurant), None);

        // An owner ordering from their own restaurant acts as the restaurant.
        let own_order = order("o2", "owner", "r1");
        assert_eq!(
            actor_for(&owner, &own_order, &restaurant),
            Some(OrderActor::Restaurant)
        );
    }

    #[test]
    fn going_out_for_delivery_needs_a_partner() {
        let mut ready = order("o1", "diner", "r1");
        ready.status = Ready;

        assert_eq!(
            check_transition(OrderActor::Admin, &ready, OutForDelivery),
            Err(Error::DeliveryPartnerRequired)
        );

        ready.delivery_partner_id = Some(String::from("rider"));
        assert_eq!(
            check_transition(OrderActor::DeliveryPartner, &ready, OutForDelivery),
            Ok(())
        );
    }

    #[test]
    fn finished_orders_report_why_they_cannot_move() {
        let mut delivered = order("o1", "diner", "r1");
        delivered.status = Delivered;

        assert_eq!(
            check_transition(OrderActor::Admin, &delivered, Cancelled),
            Err(Error::AlreadyFinished)
        );
        assert_eq!(
            check_transition(OrderActor::Customer, &order("o2", "diner", "r1"), Confirmed),
            Err(Error::InvalidTransition)
        );
    }

    #[test]
    fn cash_orders_are_paid_on_delivery() {
        let mut cash = order("o1", "diner", "r1");
        cash.status = OutForDelivery;
        assert_eq!(payment_status_after(&cash, Delivered), Some(PaymentStatus::Paid));

        let mut online = order("o2", "diner", "r1");
        online.payment_method = PaymentMethod::Online;
        assert_eq!(payment_status_after(&online, Delivered), None);
    }

    #[test]
    fn cancelling_a_paid_order_refunds_it() {
        let mut paid = order("o1", "diner", "r1");
        paid.payment_method = PaymentMethod::Online;
        paid.payment_status = PaymentStatus::Paid;
        assert_eq!(
            payment_status_after(&paid, Cancelled),
            Some(PaymentStatus::Refunded)
        );

        let unpaid = order("o2", "diner", "r1");
        assert_eq!(payment_status_after(&unpaid, Cancelled), None);
    }
}
