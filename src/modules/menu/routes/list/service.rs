use super::types::{request, response};
use crate::{
    modules::{menu::repository, restaurant, user},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant = restaurant::repository::find_by_id(&ctx.db_conn.pool, payload.restaurant_id)
        .await
        .map_err(|_| response::Error::FailedToFetchMenu)?
        .ok_or(response::Error::RestaurantNotFound)?;

    let include_unavailable = payload
        .auth
        .map(|auth| {
            restaurant::repository::is_owner(&auth.user, &restaurant)
                || user::repository::is_admin(&auth.user)
        })
        .unwrap_or(false);

    repository::find_many_by_restaurant_id(&ctx.db_conn.pool, restaurant.id, include_unavailable)
        .await
        .map_err(|_| response::Error::FailedToFetchMenu)
        .map(response::Success::Menu)
}
