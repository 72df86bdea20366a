use super::types::{request, response};
use crate::{modules::cart::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::clear_by_owner_id(&ctx.db_conn.pool, payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToClearCart)
        .map(|_| response::Success::CartCleared)
}
