use crate::modules::pricing::service;
use axum::{extract::Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "tiers": service::DELIVERY_TIERS,
            "max_distance_km": service::max_delivery_distance_km(),
            "free_delivery_threshold": service::FREE_DELIVERY_THRESHOLD,
            "tax_percent": service::TAX_PERCENT,
        })),
    )
}
