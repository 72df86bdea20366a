use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgExecutor};
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CartItem {
    pub menu_item_id: String,
    pub quantity: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Cart {
    pub id: String,
    pub owner_id: String,
    pub restaurant_id: Option<String>,
    pub items: Json<Vec<CartItem>>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Every user has exactly one cart; it is created on first access.
pub async fn find_or_create_by_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    owner_id: String,
) -> Result<Cart, Error> {
    sqlx::query_as::<_, Cart>(
        "
        INSERT INTO carts (id, owner_id)
        VALUES ($1, $2)
        ON CONFLICT (owner_id) DO UPDATE SET owner_id = EXCLUDED.owner_id
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&owner_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch cart of user {}: {}",
            owner_id,
            err
        );
        Error::UnexpectedError
    })
}

pub struct UpdateCartPayload {
    pub restaurant_id: Option<String>,
    pub items: Vec<CartItem>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateCartPayload,
) -> Result<Cart, Error> {
    sqlx::query_as::<_, Cart>(
        "
        UPDATE carts SET
            restaurant_id = $1,
            items = $2,
            updated_at = NOW()
        WHERE
            id = $3
        RETURNING *
        ",
    )
    .bind(payload.restaurant_id)
    .bind(Json(payload.items))
    .bind(&id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update cart by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn clear_by_owner_id<'e, E: PgExecutor<'e>>(e: E, owner_id: String) -> Result<(), Error> {
    sqlx::query(
        "
        UPDATE carts SET
            restaurant_id = NULL,
            items = '[]'::JSONB,
            updated_at = NOW()
        WHERE
            owner_id = $1
        ",
    )
    .bind(&owner_id)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to clear cart of user {}: {}",
            owner_id,
            err
        );
        Error::UnexpectedError
    })
}
