use super::types::{request, response};
use crate::{modules::pricing::service as pricing, types::Context, utils::geo::Coordinates};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let body = payload.body;
    let cart_quote = pricing::quote_cart(
        &ctx,
        payload.auth.user.id,
        Coordinates::new(body.latitude, body.longitude),
        body.coupon_code,
    )
    .await
    .map_err(response::Error::CartNotQuotable)?;

    Ok(response::Success::Quote(cart_quote))
}
