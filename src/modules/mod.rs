pub mod auth;
pub mod cart;
pub mod coupon;
pub mod menu;
pub mod notification;
pub mod order;
pub mod pricing;
pub mod restaurant;
pub mod user;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router(ctx: Arc<Context>) -> Router<Arc<Context>> {
    Router::new()
        .nest("/auth", auth::get_router(&ctx.app.environment))
        .nest("/users", user::get_router())
        .nest("/restaurants", restaurant::get_router())
        .nest("/menu", menu::get_router())
        .nest("/cart", cart::get_router())
        .nest("/coupons", coupon::get_router())
        .nest("/pricing", pricing::get_router())
        .nest("/orders", order::get_router())
        .nest("/deliveries", order::get_deliveries_router())
        .nest("/notifications", notification::get_router())
}
