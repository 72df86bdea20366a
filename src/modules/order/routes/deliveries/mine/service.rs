use super::types::{request, response};
use crate::{
    modules::{
        order::repository::{self, Scope},
        user,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = payload.auth.user;
    if !user::repository::is_delivery_partner(&user) {
        return Err(response::Error::NotADeliveryPartner);
    }

    repository::find_many(
        &ctx.db_conn.pool,
        payload.pagination,
        Scope::DeliveryPartner(user.id),
        payload.filters,
    )
    .await
    .map_err(|_| response::Error::FailedToFetchDeliveries)
    .map(response::Success::Deliveries)
}
