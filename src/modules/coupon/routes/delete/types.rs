pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        CouponDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CouponDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Coupon deleted successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        CouponNotFound,
        FailedToDeleteCoupon,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CouponNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Coupon not found" })),
                )
                    .into_response(),
                Self::FailedToDeleteCoupon => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete coupon" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
