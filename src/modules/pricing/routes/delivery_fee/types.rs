pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Query {
        #[validate(length(min = 1))]
        pub restaurant_id: String,
        #[validate(range(min = -90.0, max = 90.0))]
        pub latitude: f64,
        #[validate(range(min = -180.0, max = 180.0))]
        pub longitude: f64,
    }

    pub struct Payload {
        pub query: Query,
    }
}

pub mod response {
    use crate::{modules::pricing::service::FREE_DELIVERY_THRESHOLD, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        DeliveryFee {
            restaurant_id: String,
            distance_km: f64,
            delivery_fee: BigDecimal,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DeliveryFee {
                    restaurant_id,
                    distance_km,
                    delivery_fee,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "restaurant_id": restaurant_id,
                        "distance_km": distance_km,
                        "delivery_fee": delivery_fee,
                        "free_delivery_threshold": FREE_DELIVERY_THRESHOLD,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        RestaurantNotFound,
        OutOfDeliveryRange,
        FailedToCalculateDeliveryFee,
        FailedToValidate(ValidationErrors),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::OutOfDeliveryRange => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Address is outside the delivery area" })),
                )
                    .into_response(),
                Self::FailedToCalculateDeliveryFee => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to calculate delivery fee" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
