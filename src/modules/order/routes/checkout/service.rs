use super::types::{request, response};
use crate::{
    modules::{
        coupon,
        order::service::{self as order_service, Checkout, CheckoutError},
        pricing,
    },
    types::Context,
    utils::geo::Coordinates,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let body = payload.body;
    let customer = payload.auth.user;
    let destination = Coordinates::new(body.latitude, body.longitude);

    let cart_quote =
        pricing::service::quote_cart(&ctx, customer.id.clone(), destination, body.coupon_code)
            .await
            .map_err(response::Error::CartNotQuotable)?;

    order_service::place_order(
        &ctx,
        cart_quote,
        Checkout {
            customer_id: customer.id,
            payment_method: body.payment_method,
            delivery_address: body.delivery_address,
            destination,
            note: body.note,
        },
    )
    .await
    .map_err(|err| match err {
        CheckoutError::CouponExhausted => {
            response::Error::from(coupon::service::Error::UsageLimitReached)
        }
        CheckoutError::UnexpectedError => response::Error::FailedToPlaceOrder,
    })
    .map(response::Success::OrderPlaced)
}
