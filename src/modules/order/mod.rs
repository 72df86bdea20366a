pub mod job;
pub mod repository;
mod routes;
pub mod service;

pub use routes::{get_deliveries_router, get_router};
