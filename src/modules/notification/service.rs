//! In-process fan-out of order events to connected clients.

use crate::{
    modules::{
        order::repository::{Order, OrderStatus, PaymentStatus},
        user::{self, repository::User},
    },
    types::Context,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    OrderPlaced,
    StatusChanged,
    PartnerAssigned,
    PaymentUpdated,
}

#[derive(Serialize, Clone, Debug)]
pub struct OrderEvent {
    pub kind: EventKind,
    pub order_id: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub customer_id: String,
    pub restaurant_id: String,
    pub restaurant_owner_id: String,
    pub delivery_partner_id: Option<String>,
    pub at: NaiveDateTime,
}

impl OrderEvent {
    pub fn new(kind: EventKind, order: &Order, restaurant_owner_id: String) -> Self {
        Self {
            kind,
            order_id: order.id.clone(),
            status: order.status,
            payment_status: order.payment_status,
            customer_id: order.owner_id.clone(),
            restaurant_id: order.restaurant_id.clone(),
            restaurant_owner_id,
            delivery_partner_id: order.delivery_partner_id.clone(),
            at: Utc::now().naive_utc(),
        }
    }

    /// Admins and the parties of the order see every event. Unassigned orders
    /// that become ready are also offered to every delivery partner.
    pub fn is_visible_to(&self, user: &User) -> bool {
        if user::repository::is_admin(user) {
            return true;
        }

        if user.id == self.customer_id
            || user.id == self.restaurant_owner_id
            || self.delivery_partner_id.as_deref() == Some(user.id.as_str())
        {
            return true;
        }

        user::repository::is_delivery_partner(user)
            && self.delivery_partner_id.is_none()
            && self.status == OrderStatus::Ready
    }
}

#[derive(Clone)]
pub struct Hub {
    sender: broadcast::Sender<OrderEvent>,
}

impl Hub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Returns how many subscribers received the event.
    pub fn publish(&self, event: OrderEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.sender.subscribe()
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

pub fn send(ctx: &Context, event: OrderEvent) {
    let order_id = event.order_id.clone();
    let kind = event.kind;
    let receivers = ctx.notifications.publish(event);
    tracing::debug!(
        "Published {:?} for order {} to {} subscriber(s)",
        kind,
        order_id,
        receivers
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{order::repository::fixtures::order, user::repository::{fixtures::user, Role}};

    fn event(status: OrderStatus, delivery_partner_id: Option<&str>) -> OrderEvent {
        let mut order = order("o1", "customer", "r1");
        order.status = status;
        order.delivery_partner_id = delivery_partner_id.map(String::from);
        OrderEvent::new(EventKind::StatusChanged, &order, String::from("owner"))
    }

    #[test]
    fn parties_of_the_order_see_its_events() {
        let event = event(OrderStatus::Preparing, Some("rider"));

        assert!(event.is_visible_to(&user("customer", Role::Customer)));
        assert!(event.is_visible_to(&user("owner", Role::RestaurantOwner)));
        assert!(event.is_visible_to(&user("rider", Role::DeliveryPartner)));
        assert!(event.is_visible_to(&user("someone", Role::Admin)));
    }

    #[test]
    fn strangers_see_nothing() {
        let event = event(OrderStatus::Preparing, None);

        assert!(!event.is_visible_to(&user("stranger", Role::Customer)));
        assert!(!event.is_visible_to(&user("other-owner", Role::RestaurantOwner)));
        assert!(!event.is_visible_to(&user("other-rider", Role::DeliveryPartner)));
    }

    #[test]
    fn ready_unassigned_orders_are_offered_to_every_partner() {
        let rider = user("any-rider", Role::DeliveryPartner);

        assert!(event(OrderStatus::Ready, None).is_visible_to(&rider));
        assert!(!event(OrderStatus::Ready, Some("rider")).is_visible_to(&rider));
        assert!(!event(OrderStatus::Ready, None).is_visible_to(&user("c", Role::Customer)));
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let hub = Hub::new();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        assert_eq!(hub.publish(event(OrderStatus::Confirmed, None)), 2);

        assert_eq!(first.recv().await.unwrap().status, OrderStatus::Confirmed);
        assert_eq!(second.recv().await.unwrap().order_id, "o1");
    }

    #[test]
    fn publishing_without_subscribers_is_not_an_error() {
        let hub = Hub::default();
        assert_eq!(hub.publish(event(OrderStatus::Pending, None)), 0);
    }
}
