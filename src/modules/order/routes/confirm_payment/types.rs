pub mod request {
    use crate::modules::auth::middleware::AdminAuth;

    pub struct Payload {
        pub id: String,
        pub auth: AdminAuth,
    }
}

pub mod response {
    use crate::modules::order::repository::Order;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        PaymentConfirmed(Order),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PaymentConfirmed(order) => (StatusCode::OK, Json(json!(order))).into_response(),
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        NotAnOnlinePayment,
        OrderCancelled,
        AlreadyPaid,
        FailedToConfirmPayment,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::NotAnOnlinePayment => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Only online payments can be confirmed" })),
                )
                    .into_response(),
                Self::OrderCancelled => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Order has been cancelled" })),
                )
                    .into_response(),
                Self::AlreadyPaid => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Order has already been paid" })),
                )
                    .into_response(),
                Self::FailedToConfirmPayment => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to confirm payment" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
