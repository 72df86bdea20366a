use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgExecutor};
use ulid::Ulid;

use crate::utils::pagination::{Paginated, Pagination};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The following step of the delivery sequence.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }
}

impl ToString for OrderStatus {
    fn to_string(&self) -> String {
        match self {
            OrderStatus::Pending => String::from("PENDING"),
            OrderStatus::Confirmed => String::from("CONFIRMED"),
            OrderStatus::Preparing => String::from("PREPARING"),
            OrderStatus::Ready => String::from("READY"),
            OrderStatus::OutForDelivery => String::from("OUT_FOR_DELIVERY"),
            OrderStatus::Delivered => String::from("DELIVERED"),
            OrderStatus::Cancelled => String::from("CANCELLED"),
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSimpleStatus {
    Ongoing,
    Completed,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CashOnDelivery,
    Online,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

/// Who moved an order to a status.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "order_actor", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderActor {
    Customer,
    Restaurant,
    DeliveryPartner,
    Admin,
    System,
}

/// Menu item as it was when the order was placed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub line_total: BigDecimal,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub items: Json<Vec<OrderItem>>,
    pub sub_total: BigDecimal,
    pub discount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub distance_km: f64,
    pub coupon_code: Option<String>,
    pub delivery_address: String,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
    pub note: String,
    pub cancellation_reason: Option<String>,
    pub restaurant_id: String,
    pub owner_id: String,
    pub delivery_partner_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct OrderStatusUpdate {
    pub id: String,
    pub order_id: String,
    pub status: OrderStatus,
    pub actor: OrderActor,
    pub actor_id: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct CreateOrderPayload {
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderItem>,
    pub sub_total: BigDecimal,
    pub discount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub distance_km: f64,
    pub coupon_code: Option<String>,
    pub delivery_address: String,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
    pub note: String,
    pub restaurant_id: String,
    pub owner_id: String,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateOrderPayload,
) -> Result<Order, Error> {
    sqlx::query_as::<_, Order>(
        "
        INSERT INTO orders (
            id,
            status,
            payment_method,
            payment_status,
            items,
            sub_total,
            discount,
            delivery_fee,
            tax,
            total,
            distance_km,
            coupon_code,
            delivery_address,
            delivery_latitude,
            delivery_longitude,
            note,
            restaurant_id,
            owner_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(OrderStatus::Pending)
    .bind(payload.payment_method)
    .bind(PaymentStatus::Pending)
    .bind(Json(payload.items))
    .bind(payload.sub_total)
    .bind(payload.discount)
    .bind(payload.delivery_fee)
    .bind(payload.tax)
    .bind(payload.total)
    .bind(payload.distance_km)
    .bind(payload.coupon_code)
    .bind(payload.delivery_address)
    .bind(payload.delivery_latitude)
    .bind(payload.delivery_longitude)
    .bind(payload.note)
    .bind(payload.restaurant_id)
    .bind(payload.owner_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create an order: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch order by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub struct CreateStatusUpdatePayload {
    pub order_id: String,
    pub status: OrderStatus,
    pub actor: OrderActor,
    pub actor_id: Option<String>,
}

pub async fn create_status_update<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateStatusUpdatePayload,
) -> Result<OrderStatusUpdate, Error> {
    sqlx::query_as::<_, OrderStatusUpdate>(
        "
        INSERT INTO order_status_updates (id, order_id, status, actor, actor_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.order_id)
    .bind(payload.status)
    .bind(payload.actor)
    .bind(payload.actor_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to record a status update for order {}: {}",
            payload.order_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_status_updates_by_order_id<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
) -> Result<Vec<OrderStatusUpdate>, Error> {
    sqlx::query_as::<_, OrderStatusUpdate>(
        "SELECT * FROM order_status_updates WHERE order_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(&order_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch status history of order {}: {}",
            order_id,
            err
        );
        Error::UnexpectedError
    })
}

/// Whose orders a listing covers.
#[derive(Clone, Debug)]
pub enum Scope {
    All,
    Customer(String),
    Restaurant(String),
    DeliveryPartner(String),
}

#[derive(Deserialize, Default, Clone, Debug)]
pub struct Filters {
    pub status: Option<OrderStatus>,
    pub simple_status: Option<OrderSimpleStatus>,
}

pub async fn find_many<'e, E>(
    e: E,
    pagination: Pagination,
    scope: Scope,
    filters: Filters,
) -> Result<Paginated<Order>, Error>
where
    E: PgExecutor<'e> + Copy,
{
    const FILTER: &str = "
        ($1::TEXT IS NULL OR owner_id = $1)
        AND ($2::TEXT IS NULL OR restaurant_id = $2)
        AND ($3::TEXT IS NULL OR delivery_partner_id = $3)
        AND ($4::order_status IS NULL OR status = $4)
        AND ($5::BOOLEAN IS NULL OR (status IN ('DELIVERED', 'CANCELLED')) = $5)
    ";

    let (owner_id, restaurant_id, delivery_partner_id) = match scope {
        Scope::All => (None, None, None),
        Scope::Customer(id) => (Some(id), None, None),
        Scope::Restaurant(id) => (None, Some(id), None),
        Scope::DeliveryPartner(id) => (None, None, Some(id)),
    };

    let completed = filters
        .simple_status
        .map(|simple_status| simple_status == OrderSimpleStatus::Completed);

    let items = sqlx::query_as::<_, Order>(&format!(
        "SELECT * FROM orders WHERE {} ORDER BY created_at DESC LIMIT $6 OFFSET $7",
        FILTER
    ))
    .bind(owner_id.clone())
    .bind(restaurant_id.clone())
    .bind(delivery_partner_id.clone())
    .bind(filters.status)
    .bind(completed)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many orders: {}", err);
        Error::UnexpectedError
    })?;

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM orders WHERE {}",
        FILTER
    ))
    .bind(owner_id)
    .bind(restaurant_id)
    .bind(delivery_partner_id)
    .bind(filters.status)
    .bind(completed)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to count orders: {}", err);
        Error::UnexpectedError
    })?;

    Ok(Paginated::new(items, total as u32, &pagination))
}

const ASSIGNABLE: &str = "status IN ('CONFIRMED', 'PREPARING', 'READY') AND delivery_partner_id IS NULL";

/// Orders still waiting for a delivery partner, oldest first.
pub async fn find_many_unassigned<'e, E>(
    e: E,
    pagination: Pagination,
) -> Result<Paginated<Order>, Error>
where
    E: PgExecutor<'e> + Copy,
{
    let items = sqlx::query_as::<_, Order>(&format!(
        "SELECT * FROM orders WHERE {} ORDER BY created_at ASC LIMIT $1 OFFSET $2",
        ASSIGNABLE
    ))
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch unassigned orders: {}",
            err
        );
        Error::UnexpectedError
    })?;

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM orders WHERE {}",
        ASSIGNABLE
    ))
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to count unassigned orders: {}",
            err
        );
        Error::UnexpectedError
    })?;

    Ok(Paginated::new(items, total as u32, &pagination))
}

/// Claims the order for a delivery partner. Returns `None` when somebody got
/// there first or the order can no longer be assigned.
pub async fn assign_delivery_partner<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
    delivery_partner_id: String,
) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>(&format!(
        "
        UPDATE orders SET
            delivery_partner_id = $1,
            updated_at = NOW()
        WHERE
            id = $2
            AND {}
        RETURNING *
        ",
        ASSIGNABLE
    ))
    .bind(&delivery_partner_id)
    .bind(&order_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while assigning order {} to delivery partner {}: {}",
            order_id,
            delivery_partner_id,
            err
        );
        Error::UnexpectedError
    })
}

pub struct UpdateStatusPayload {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub payment_status: Option<PaymentStatus>,
    pub cancellation_reason: Option<String>,
}

/// Moves the order from `from` to `to`. Returns `None` when the order is no
/// longer in `from`.
pub async fn update_status<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
    payload: UpdateStatusPayload,
) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>(
        "
        UPDATE orders SET
            status = $1,
            payment_status = COALESCE($2, payment_status),
            cancellation_reason = COALESCE($3, cancellation_reason),
            updated_at = NOW()
        WHERE
            id = $4
            AND status = $5
        RETURNING *
        ",
    )
    .bind(payload.to)
    .bind(payload.payment_status)
    .bind(payload.cancellation_reason)
    .bind(&order_id)
    .bind(payload.from)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error updating status for order {}: {}", order_id, err);
        Error::UnexpectedError
    })
}

pub async fn update_payment_status<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
    from: PaymentStatus,
    to: PaymentStatus,
) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>(
        "
        UPDATE orders SET
            payment_status = $1,
            updated_at = NOW()
        WHERE
            id = $2
            AND payment_status = $3
            AND status <> 'CANCELLED'
        RETURNING *
        ",
    )
    .bind(to)
    .bind(&order_id)
    .bind(from)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error updating payment status for order {}: {}",
            order_id,
            err
        );
        Error::UnexpectedError
    })
}

/// `PENDING` orders placed before `cutoff`.
pub async fn find_many_pending_before<'e, E: PgExecutor<'e>>(
    e: E,
    cutoff: NaiveDateTime,
) -> Result<Vec<Order>, Error> {
    sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE status = 'PENDING' AND created_at < $1 ORDER BY created_at ASC",
    )
    .bind(cutoff)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch stale orders: {}", err);
        Error::UnexpectedError
    })
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use std::str::FromStr;

    pub fn order(id: &str, owner_id: &str, restaurant_id: &str) -> Order {
        let money = |s: &str| BigDecimal::from_str(s).unwrap();
        Order {
            id: id.to_string(),
            status: OrderStatus::Pending,
            payment_method: PaymentMethod::CashOnDelivery,
            payment_status: PaymentStatus::Pending,
            items: Json(vec![OrderItem {
                menu_item_id: String::from("dosa"),
                name: String::from("Masala Dosa"),
                price: money("120"),
                quantity: 2,
                line_total: money("240"),
            }]),
            sub_total: money("240"),
            discount: money("0"),
            delivery_fee: money("30"),
            tax: money("12"),
            total: money("282"),
            distance_km: 3.2,
            coupon_code: None,
            delivery_address: String::from("221 Residency Road"),
            delivery_latitude: 12.9600,
            delivery_longitude: 77.6000,
            note: String::new(),
            cancellation_reason: None,
            restaurant_id: restaurant_id.to_string(),
            owner_id: owner_id.to_string(),
            delivery_partner_id: None,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }
}
