pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub order_id: String,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::order::repository::Order;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        DeliveryAccepted(Order),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DeliveryAccepted(order) => (StatusCode::OK, Json(json!(order))).into_response(),
            }
        }
    }

    pub enum Error {
        NotADeliveryPartner,
        OrderNotFound,
        AlreadyAssigned,
        NotAssignable,
        FailedToAcceptDelivery,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::NotADeliveryPartner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only delivery partners can accept deliveries" })),
                )
                    .into_response(),
                Self::OrderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::AlreadyAssigned => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Order has already been accepted by another delivery partner" })),
                )
                    .into_response(),
                Self::NotAssignable => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Order is not waiting for a delivery partner" })),
                )
                    .into_response(),
                Self::FailedToAcceptDelivery => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to accept delivery" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
