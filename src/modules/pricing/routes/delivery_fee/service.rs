use super::types::{request, response};
use crate::{
    modules::{pricing::service as pricing, restaurant},
    types::Context,
    utils::geo::Coordinates,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .query
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let query = payload.query;
    let restaurant = restaurant::repository::find_by_id(&ctx.db_conn.pool, query.restaurant_id)
        .await
        .map_err(|_| response::Error::FailedToCalculateDeliveryFee)?
        .ok_or(response::Error::RestaurantNotFound)?;

    let distance_km = pricing::distance_km(
        &restaurant,
        Coordinates::new(query.latitude, query.longitude),
    );

    let delivery_fee = pricing::delivery_fee_for_distance(distance_km).map_err(|err| match err {
        pricing::Error::OutOfRange => response::Error::OutOfDeliveryRange,
        pricing::Error::InvalidDistance => response::Error::FailedToCalculateDeliveryFee,
    })?;

    Ok(response::Success::DeliveryFee {
        restaurant_id: restaurant.id,
        distance_km: pricing::round_distance(distance_km),
        delivery_fee,
    })
}
