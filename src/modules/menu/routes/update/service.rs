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

    let item = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateMenuItem)?
        .ok_or(response::Error::MenuItemNotFound)?;

    let restaurant = restaurant::repository::find_by_id(&ctx.db_conn.pool, item.restaurant_id)
        .await
        .map_err(|_| response::Error::FailedToUpdateMenuItem)?
        .ok_or(response::Error::FailedToUpdateMenuItem)?;

    if !restaurant::repository::is_owner(&payload.auth.user, &restaurant)
        && !user::repository::is_admin(&payload.auth.user)
    {
        return Err(response::Error::UserNotOwner);
    }

    let body = payload.body;
    repository::update_by_id(
        &ctx.db_conn.pool,
        item.id,
        repository::UpdateMenuItemPayload {
            name: body.name,
            description: body.description,
            price: body.price,
            category: body.category,
            is_veg: body.is_veg,
            is_available: body.is_available,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateMenuItem)
    .map(response::Success::MenuItemUpdated)
}
