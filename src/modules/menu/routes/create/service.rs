use super::types::{request, response};
use crate::{
    modules::{menu::repository, restaurant, user},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let restaurant = restaurant::repository::find_by_id(&ctx.db_conn.pool, payload.restaurant_id)
        .await
        .map_err(|_| response::Error::FailedToCreateMenuItem)?
        .ok_or(response::Error::RestaurantNotFound)?;

    if !restaurant::repository::is_owner(&payload.auth.user, &restaurant)
        && !user::repository::is_admin(&payload.auth.user)
    {
        return Err(response::Error::UserNotOwner);
    }

    let body = payload.body;
    repository::create(
        &ctx.db_conn.pool,
        repository::CreateMenuItemPayload {
            name: body.name,
            description: body.description.unwrap_or_default(),
            price: body.price,
            category: body.category,
            is_veg: body.is_veg.unwrap_or(false),
            restaurant_id: restaurant.id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateMenuItem)
    .map(response::Success::MenuItemCreated)
}
