use super::types::{request, response};
use crate::{modules::coupon::repository, types::Context};
use bigdecimal::{BigDecimal, Zero};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let coupon = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateCoupon)?
        .ok_or(response::Error::CouponNotFound)?;

    let body = payload.body;
    if body.has_conflicting_limits() {
        return Err(response::Error::ConflictingLimits);
    }
    if let Some(min_order_value) = &body.min_order_value {
        if min_order_value < &BigDecimal::zero() {
            return Err(response::Error::InvalidMinimumOrderValue);
        }
    }

    let valid_from = body.valid_from.map(|at| at.naive_utc());
    let valid_until = body.valid_until.map(|at| at.naive_utc());
    if valid_until.unwrap_or(coupon.valid_until) <= valid_from.unwrap_or(coupon.valid_from) {
        return Err(response::Error::InvalidValidityWindow);
    }

    let coupon = repository::update_by_id(
        &ctx.db_conn.pool,
        coupon.id,
        repository::UpdateCouponPayload {
            description: body.description,
            is_active: body.is_active,
            max_discount: body.max_discount,
            min_order_value: body.min_order_value,
            valid_from,
            valid_until,
            usage_limit: body.usage_limit,
            clear_max_discount: body.clear_max_discount.unwrap_or(false),
            clear_usage_limit: body.clear_usage_limit.unwrap_or(false),
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateCoupon)?;

    tracing::info!("Coupon {} updated", coupon.code);

    Ok(response::Success::CouponUpdated(coupon))
}
