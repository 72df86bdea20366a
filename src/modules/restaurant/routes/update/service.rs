use super::types::{request, response};
use crate::{
    modules::{restaurant::repository, user},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let restaurant = repository::find_by_id(&ctx.db_conn.pool, payload.id.clone())
        .await
        .map_err(|_| response::Error::FailedToUpdateRestaurant)?
        .ok_or(response::Error::RestaurantNotFound)?;

    if !repository::is_owner(&payload.auth.user, &restaurant)
        && !user::repository::is_admin(&payload.auth.user)
    {
        return Err(response::Error::UserNotOwner);
    }

    let body = payload.body;
    repository::update_by_id(
        &ctx.db_conn.pool,
        restaurant.id,
        repository::UpdateRestaurantPayload {
            name: body.name,
            description: body.description,
            address: body.address,
            phone_number: body.phone_number,
            cuisine: body.cuisine,
            latitude: body.latitude,
            longitude: body.longitude,
            opening_time: body.opening_time,
            closing_time: body.closing_time,
            is_open: body.is_open,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateRestaurant)
    .map(response::Success::RestaurantUpdated)
}
