use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    RestaurantOwner,
    DeliveryPartner,
    Admin,
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::Customer => String::from("CUSTOMER"),
            Role::RestaurantOwner => String::from("RESTAURANT_OWNER"),
            Role::DeliveryPartner => String::from("DELIVERY_PARTNER"),
            Role::Admin => String::from("ADMIN"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct UpsertUserPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Creates the user or, when the email is already registered, switches its
/// role to the requested one.
pub async fn upsert_by_email<'e, E>(e: E, payload: UpsertUserPayload) -> Result<User>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        "
        INSERT INTO users (id, email, first_name, last_name, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET
            role = EXCLUDED.role,
            updated_at = NOW()
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.email.to_lowercase())
    .bind(payload.first_name)
    .bind(payload.last_name)
    .bind(payload.role)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while upserting a user account: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub struct UpdateUserPayload {
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateUserPayload,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            phone_number = COALESCE($1, phone_number),
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            updated_at = NOW()
        WHERE
            id = $4
        RETURNING *
        ",
    )
    .bind(payload.phone_number)
    .bind(payload.first_name)
    .bind(payload.last_name)
    .bind(&id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating user with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub fn is_admin(user: &User) -> bool {
    user.role == Role::Admin
}

pub fn is_restaurant_owner(user: &User) -> bool {
    user.role == Role::RestaurantOwner
}

pub fn is_delivery_partner(user: &User) -> bool {
    user.role == Role::DeliveryPartner
}

#[cfg(test)]
pub mod fixtures {
    use super::{Role, User};

    pub fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@flashbites.test", id),
            phone_number: None,
            first_name: String::from("Test"),
            last_name: String::from("User"),
            role,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }
}
