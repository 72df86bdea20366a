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

    let user = payload.auth.user;
    if !user::repository::is_restaurant_owner(&user) && !user::repository::is_admin(&user) {
        return Err(response::Error::NotARestaurantOwner);
    }

    let existing = repository::find_by_owner_id(&ctx.db_conn.pool, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateRestaurant)?;
    if existing.is_some() {
        return Err(response::Error::AlreadyCreatedRestaurant);
    }

    let body = payload.body;
    let restaurant = repository::create(
        &ctx.db_conn.pool,
        repository::CreateRestaurantPayload {
            name: body.name,
            description: body.description.unwrap_or_default(),
            address: body.address,
            phone_number: body.phone_number,
            cuisine: body.cuisine,
            latitude: body.latitude,
            longitude: body.longitude,
            opening_time: body.opening_time,
            closing_time: body.closing_time,
            owner_id: user.id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateRestaurant)?;

    tracing::info!("Restaurant {} created", restaurant.id);

    Ok(response::Success::RestaurantCreated(restaurant))
}
