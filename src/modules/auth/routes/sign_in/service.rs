use super::types::{request, response};
use crate::{
    modules::{auth, user},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let user = user::repository::upsert_by_email(
        &ctx.db_conn.pool,
        user::repository::UpsertUserPayload {
            email: payload.email,
            first_name: payload.first_name.unwrap_or_else(|| String::from("FlashBites")),
            last_name: payload.last_name.unwrap_or_else(|| String::from("User")),
            role: payload.role.unwrap_or(user::repository::Role::Customer),
        },
    )
    .await
    .map_err(|_| response::Error::FailedToFetchUser)?;

    tracing::debug!("Issuing development session for user {}", user.id);

    auth::service::create_session(ctx, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateSession)
        .map(|session| response::Success::Session { session, user })
}
