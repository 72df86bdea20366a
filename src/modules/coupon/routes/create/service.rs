use super::types::{request, response};
use crate::{
    modules::{
        coupon::repository::{self, DiscountType},
        restaurant,
    },
    types::Context,
};
use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let body = payload.body;
    if body.discount_type == DiscountType::Percentage && body.value > BigDecimal::from(100) {
        return Err(response::Error::InvalidPercentage);
    }

    let min_order_value = body.min_order_value.unwrap_or_else(BigDecimal::zero);
    if min_order_value < BigDecimal::zero() {
        return Err(response::Error::InvalidMinimumOrderValue);
    }

    let valid_from = body.valid_from.unwrap_or_else(Utc::now).naive_utc();
    let valid_until = body.valid_until.naive_utc();
    if valid_until <= valid_from {
        return Err(response::Error::InvalidValidityWindow);
    }

    if let Some(restaurant_id) = body.restaurant_id.clone() {
        restaurant::repository::find_by_id(&ctx.db_conn.pool, restaurant_id)
            .await
            .map_err(|_| response::Error::FailedToCreateCoupon)?
            .ok_or(response::Error::RestaurantNotFound)?;
    }

    let coupon = repository::create(
        &ctx.db_conn.pool,
        repository::CreateCouponPayload {
            code: body.code,
            description: body.description.unwrap_or_default(),
            discount_type: body.discount_type,
            value: body.value,
            max_discount: body.max_discount,
            min_order_value,
            valid_from,
            valid_until,
            usage_limit: body.usage_limit,
            restaurant_id: body.restaurant_id,
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::DuplicateCode => response::Error::DuplicateCode,
        repository::Error::UnexpectedError => response::Error::FailedToCreateCoupon,
    })?;

    tracing::info!("Coupon {} created", coupon.code);

    Ok(response::Success::CouponCreated(coupon))
}
