pub mod database;
pub mod geo;
pub mod pagination;
pub mod validation;
