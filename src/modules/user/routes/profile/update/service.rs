use super::types::{request, response};
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    repository::update_by_id(
        &ctx.db_conn.pool,
        payload.auth.user.id,
        repository::UpdateUserPayload {
            phone_number: payload.body.phone_number,
            first_name: payload.body.first_name,
            last_name: payload.body.last_name,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateUser)
    .map(response::Success::UserUpdated)
}
