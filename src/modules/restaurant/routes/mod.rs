mod create;
mod get;
mod list;
mod update;

use crate::{modules::menu, types::Context};
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(create::get_router())
        .merge(list::get_router())
        .merge(get::get_router())
        .merge(update::get_router())
        .nest("/:id/menu", menu::get_restaurant_menu_router())
}
