pub mod repository;
mod routes;

pub use routes::{get_restaurant_menu_router, get_router};
