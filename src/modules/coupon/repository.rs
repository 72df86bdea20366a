use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

use crate::utils::pagination::{Paginated, Pagination};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "discount_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub value: BigDecimal,
    pub max_discount: Option<BigDecimal>,
    pub min_order_value: BigDecimal,
    pub valid_from: NaiveDateTime,
    pub valid_until: NaiveDateTime,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub is_active: bool,
    pub restaurant_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    DuplicateCode,
    UnexpectedError,
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub struct CreateCouponPayload {
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub value: BigDecimal,
    pub max_discount: Option<BigDecimal>,
    pub min_order_value: BigDecimal,
    pub valid_from: NaiveDateTime,
    pub valid_until: NaiveDateTime,
    pub usage_limit: Option<i32>,
    pub restaurant_id: Option<String>,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|err| err.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateCouponPayload,
) -> Result<Coupon, Error> {
    sqlx::query_as::<_, Coupon>(
        "
        INSERT INTO coupons (
            id,
            code,
            description,
            discount_type,
            value,
            max_discount,
            min_order_value,
            valid_from,
            valid_until,
            usage_limit,
            restaurant_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(normalize_code(&payload.code))
    .bind(payload.description)
    .bind(payload.discount_type)
    .bind(payload.value)
    .bind(payload.max_discount)
    .bind(payload.min_order_value)
    .bind(payload.valid_from)
    .bind(payload.valid_until)
    .bind(payload.usage_limit)
    .bind(payload.restaurant_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            return Error::DuplicateCode;
        }
        tracing::error!("Error occurred while trying to create a coupon: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Coupon>, Error> {
    sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE id = $1")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch coupon by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_code<'e, E: PgExecutor<'e>>(
    e: E,
    code: &str,
) -> Result<Option<Coupon>, Error> {
    let code = normalize_code(code);
    sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE code = $1")
        .bind(&code)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch coupon by code {}: {}",
                code,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_many<'e, E>(e: E, pagination: Pagination) -> Result<Paginated<Coupon>, Error>
where
    E: PgExecutor<'e> + Copy,
{
    let items = sqlx::query_as::<_, Coupon>(
        "SELECT * FROM coupons ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many coupons: {}", err);
        Error::UnexpectedError
    })?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM coupons")
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to count coupons: {}", err);
            Error::UnexpectedError
        })?;

    Ok(Paginated::new(items, total as u32, &pagination))
}

/// Active coupons inside their validity window that still have uses left.
/// With a restaurant id, platform-wide coupons are included alongside that
/// restaurant's own.
pub async fn find_available<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: Option<String>,
    now: NaiveDateTime,
) -> Result<Vec<Coupon>, Error> {
    sqlx::query_as::<_, Coupon>(
        "
        SELECT * FROM coupons
        WHERE
            is_active = TRUE
            AND valid_from <= $1
            AND valid_until >= $1
            AND (usage_limit IS NULL OR used_count < usage_limit)
            AND (restaurant_id IS NULL OR $2::TEXT IS NULL OR restaurant_id = $2)
        ORDER BY valid_until ASC
        ",
    )
    .bind(now)
    .bind(restaurant_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch available coupons: {}",
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Default)]
pub struct UpdateCouponPayload {
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub max_discount: Option<BigDecimal>,
    pub min_order_value: Option<BigDecimal>,
    pub valid_from: Option<NaiveDateTime>,
    pub valid_until: Option<NaiveDateTime>,
    pub usage_limit: Option<i32>,
    /// Lifts the discount cap. Takes precedence over `max_discount`.
    pub clear_max_discount: bool,
    /// Makes the coupon usable without limit. Takes precedence over
    /// `usage_limit`.
    pub clear_usage_limit: bool,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateCouponPayload,
) -> Result<Coupon, Error> {
    sqlx::query_as::<_, Coupon>(
        "
        UPDATE coupons SET
            description = COALESCE($1, description),
            is_active = COALESCE($2, is_active),
            max_discount = CASE WHEN $9 THEN NULL ELSE COALESCE($3, max_discount) END,
            min_order_value = COALESCE($4, min_order_value),
            valid_from = COALESCE($5, valid_from),
            valid_until = COALESCE($6, valid_until),
            usage_limit = CASE WHEN $10 THEN NULL ELSE COALESCE($7, usage_limit) END,
            updated_at = NOW()
        WHERE
            id = $8
        RETURNING *
        ",
    )
    .bind(payload.description)
    .bind(payload.is_active)
    .bind(payload.max_discount)
    .bind(payload.min_order_value)
    .bind(payload.valid_from)
    .bind(payload.valid_until)
    .bind(payload.usage_limit)
    .bind(&id)
    .bind(payload.clear_max_discount)
    .bind(payload.clear_usage_limit)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update coupon by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<bool, Error> {
    sqlx::query("DELETE FROM coupons WHERE id = $1")
        .bind(&id)
        .execute(e)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to delete coupon by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

/// Bumps `used_count` unless the limit has been reached in the meantime.
/// Returns `None` when no use was left.
pub async fn consume_usage<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<Coupon>, Error> {
    sqlx::query_as::<_, Coupon>(
        "
        UPDATE coupons SET
            used_count = used_count + 1,
            updated_at = NOW()
        WHERE
            id = $1
            AND (usage_limit IS NULL OR used_count < usage_limit)
        RETURNING *
        ",
    )
    .bind(&id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to consume usage of coupon {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

#[cfg(test)]
pub mod fixtures {
    use super::{Coupon, DiscountType};
    use bigdecimal::BigDecimal;
    use chrono::{Duration, Utc};
    use std::str::FromStr;

    pub fn coupon(code: &str, discount_type: DiscountType, value: &str) -> Coupon {
        let now = Utc::now().naive_utc();
        Coupon {
            id: format!("coupon-{}", code.to_lowercase()),
            code: code.to_string(),
            description: String::new(),
            discount_type,
            value: BigDecimal::from_str(value).unwrap(),
            max_discount: None,
            min_order_value: BigDecimal::from(0),
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(30),
            usage_limit: None,
            used_count: 0,
            is_active: true,
            restaurant_id: None,
            created_at: now - Duration::days(1),
            updated_at: None,
        }
    }
}
