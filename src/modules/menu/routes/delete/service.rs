use super::types::{request, response};
use crate::{
    modules::{menu::repository, restaurant, user},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let item = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToDeleteMenuItem)?
        .ok_or(response::Error::MenuItemNotFound)?;

    let restaurant = restaurant::repository::find_by_id(&ctx.db_conn.pool, item.restaurant_id)
        .await
        .map_err(|_| response::Error::FailedToDeleteMenuItem)?
        .ok_or(response::Error::FailedToDeleteMenuItem)?;

    if !restaurant::repository::is_owner(&payload.auth.user, &restaurant)
        && !user::repository::is_admin(&payload.auth.user)
    {
        return Err(response::Error::UserNotOwner);
    }

    repository::delete_by_id(&ctx.db_conn.pool, item.id)
        .await
        .map_err(|_| response::Error::FailedToDeleteMenuItem)
        .map(|_| response::Success::MenuItemDeleted)
}
