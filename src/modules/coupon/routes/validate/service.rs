use super::types::{request, response};
use crate::{
    modules::coupon::{repository, service as coupon_service},
    types::Context,
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let body = payload.body;
    let coupon = repository::find_by_code(&ctx.db_conn.pool, &body.code)
        .await
        .map_err(|_| response::Error::FailedToValidateCoupon)?
        .ok_or(response::Error::CouponNotFound)?;

    let discount = coupon_service::apply(
        &coupon,
        &coupon_service::Eligibility {
            sub_total: &body.sub_total,
            restaurant_id: &body.restaurant_id,
            now: Utc::now().naive_utc(),
        },
    )
    .map_err(response::Error::CouponNotApplicable)?;

    Ok(response::Success::CouponApplicable { coupon, discount })
}
