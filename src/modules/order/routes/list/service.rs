use super::types::{request, response};
use crate::{
    modules::{
        order::repository::{self, Filters, Scope},
        restaurant, user,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = payload.auth.user;
    let query = payload.query;

    let scope = if query.as_restaurant.unwrap_or(false) {
        let restaurant = restaurant::repository::find_by_owner_id(&ctx.db_conn.pool, user.id)
            .await
            .map_err(|_| response::Error::FailedToFetchOrders)?
            .ok_or(response::Error::UserDoesNotOwnRestaurant)?;
        Scope::Restaurant(restaurant.id)
    } else if user::repository::is_admin(&user) {
        Scope::All
    } else {
        Scope::Customer(user.id)
    };

    repository::find_many(
        &ctx.db_conn.pool,
        payload.pagination,
        scope,
        Filters {
            status: query.status,
            simple_status: query.simple_status,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToFetchOrders)
    .map(response::Success::Orders)
}
