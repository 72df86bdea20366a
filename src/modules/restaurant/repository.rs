use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

use crate::{
    modules::user::repository::User,
    utils::{
        geo::Coordinates,
        pagination::{Paginated, Pagination},
    },
};

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub cuisine: String,
    pub latitude: f64,
    pub longitude: f64,
    pub opening_time: String,
    pub closing_time: String,
    pub is_open: bool,
    pub owner_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Restaurant {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

pub struct CreateRestaurantPayload {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub cuisine: String,
    pub latitude: f64,
    pub longitude: f64,
    pub opening_time: String,
    pub closing_time: String,
    pub owner_id: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateRestaurantPayload,
) -> Result<Restaurant, Error> {
    sqlx::query_as::<_, Restaurant>(
        "
        INSERT INTO restaurants (
            id,
            name,
            description,
            address,
            phone_number,
            cuisine,
            latitude,
            longitude,
            opening_time,
            closing_time,
            owner_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.address)
    .bind(payload.phone_number)
    .bind(payload.cuisine)
    .bind(payload.latitude)
    .bind(payload.longitude)
    .bind(payload.opening_time)
    .bind(payload.closing_time)
    .bind(payload.owner_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a restaurant: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch restaurant by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    owner_id: String,
) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE owner_id = $1")
        .bind(&owner_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch restaurant by owner id {}: {}",
                owner_id,
                err
            );
            Error::UnexpectedError
        })
}

#[derive(Deserialize, Default)]
pub struct Filters {
    pub search: Option<String>,
    pub cuisine: Option<String>,
    pub is_open: Option<bool>,
}

pub async fn find_many<'e, E>(
    e: E,
    pagination: Pagination,
    filters: Filters,
) -> Result<Paginated<Restaurant>, Error>
where
    E: PgExecutor<'e> + Copy,
{
    const FILTER: &str = "
        ($1::TEXT IS NULL OR name ILIKE CONCAT('%', $1, '%'))
        AND ($2::TEXT IS NULL OR cuisine ILIKE $2)
        AND ($3::BOOLEAN IS NULL OR is_open = $3)
    ";

    let items = sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT * FROM restaurants WHERE {} ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        FILTER
    ))
    .bind(filters.search.clone())
    .bind(filters.cuisine.clone())
    .bind(filters.is_open)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many restaurants: {}", err);
        Error::UnexpectedError
    })?;

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM restaurants WHERE {}",
        FILTER
    ))
    .bind(filters.search)
    .bind(filters.cuisine)
    .bind(filters.is_open)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to count restaurants: {}", err);
        Error::UnexpectedError
    })?;

    Ok(Paginated::new(items, total as u32, &pagination))
}

#[derive(Default)]
pub struct UpdateRestaurantPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub cuisine: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub is_open: Option<bool>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateRestaurantPayload,
) -> Result<Restaurant, Error> {
    sqlx::query_as::<_, Restaurant>(
        "
        UPDATE restaurants SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            address = COALESCE($3, address),
            phone_number = COALESCE($4, phone_number),
            cuisine = COALESCE($5, cuisine),
            latitude = COALESCE($6, latitude),
            longitude = COALESCE($7, longitude),
            opening_time = COALESCE($8, opening_time),
            closing_time = COALESCE($9, closing_time),
            is_open = COALESCE($10, is_open),
            updated_at = NOW()
        WHERE
            id = $11
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.address)
    .bind(payload.phone_number)
    .bind(payload.cuisine)
    .bind(payload.latitude)
    .bind(payload.longitude)
    .bind(payload.opening_time)
    .bind(payload.closing_time)
    .bind(payload.is_open)
    .bind(&id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update restaurant by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub fn is_owner(user: &User, restaurant: &Restaurant) -> bool {
    restaurant.owner_id == user.id
}

#[cfg(test)]
pub mod fixtures {
    use super::Restaurant;

    pub fn restaurant(id: &str, owner_id: &str) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: String::from("Dosa Corner"),
            description: String::new(),
            address: String::from("12 MG Road"),
            phone_number: String::from("9999999999"),
            cuisine: String::from("South Indian"),
            latitude: 12.9716,
            longitude: 77.5946,
            opening_time: String::from("08:00"),
            closing_time: String::from("22:00"),
            is_open: true,
            owner_id: owner_id.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }
}
