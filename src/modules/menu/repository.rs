use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, PgExecutor};
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub is_veg: bool,
    pub is_available: bool,
    pub restaurant_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl MenuItem {
    pub fn is_orderable(&self) -> bool {
        self.is_available && self.deleted_at.is_none()
    }
}

pub struct CreateMenuItemPayload {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub is_veg: bool,
    pub restaurant_id: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateMenuItemPayload,
) -> Result<MenuItem, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        INSERT INTO menu_items (id, name, description, price, category, is_veg, restaurant_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.category)
    .bind(payload.is_veg)
    .bind(payload.restaurant_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a menu item: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = $1 AND deleted_at IS NULL")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch menu item by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

/// Deleted items are included so that callers can tell a stale cart entry
/// apart from an unknown id.
pub async fn find_many_by_ids<'e, E: PgExecutor<'e>>(
    e: E,
    ids: Vec<String>,
) -> Result<Vec<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch menu items by ids: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_many_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    include_unavailable: bool,
) -> Result<Vec<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        SELECT * FROM menu_items
        WHERE
            restaurant_id = $1
            AND deleted_at IS NULL
            AND ($2 OR is_available = TRUE)
        ORDER BY category, name
        ",
    )
    .bind(&restaurant_id)
    .bind(include_unavailable)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch the menu of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Default)]
pub struct UpdateMenuItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub category: Option<String>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateMenuItemPayload,
) -> Result<MenuItem, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        UPDATE menu_items SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            price = COALESCE($3, price),
            category = COALESCE($4, category),
            is_veg = COALESCE($5, is_veg),
            is_available = COALESCE($6, is_available),
            updated_at = NOW()
        WHERE
            id = $7
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.category)
    .bind(payload.is_veg)
    .bind(payload.is_available)
    .bind(&id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update menu item by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<(), Error> {
    sqlx::query("UPDATE menu_items SET deleted_at = NOW() WHERE id = $1")
        .bind(&id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to delete menu item by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

#[cfg(test)]
pub mod fixtures {
    use super::MenuItem;
    use sqlx::types::BigDecimal;
    use std::str::FromStr;

    pub fn menu_item(id: &str, restaurant_id: &str, price: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            description: String::new(),
            price: BigDecimal::from_str(price).expect("valid price"),
            category: String::from("Mains"),
            is_veg: true,
            is_available: true,
            restaurant_id: restaurant_id.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
            deleted_at: None,
        }
    }
}
