use super::types::{request, response};
use crate::{modules::cart::service as cart_service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    cart_service::load_priced_cart(&ctx, payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToFetchCart)
        .map(|(cart, priced)| response::Success::Cart { id: cart.id, priced })
}
