use super::types::{request, response};
use crate::{
    modules::{order::repository, user},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if !user::repository::is_delivery_partner(&payload.auth.user) {
        return Err(response::Error::NotADeliveryPartner);
    }

    repository::find_many_unassigned(&ctx.db_conn.pool, payload.pagination)
        .await
        .map_err(|_| response::Error::FailedToFetchDeliveries)
        .map(response::Success::Deliveries)
}
