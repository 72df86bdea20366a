pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Query {
        pub restaurant_id: Option<String>,
    }

    pub struct Payload {
        pub query: Query,
    }
}

pub mod response {
    use crate::modules::coupon::repository::Coupon;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Coupons(Vec<Coupon>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Coupons(coupons) => {
                    (StatusCode::OK, Json(json!({ "items": coupons }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchCoupons,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchCoupons => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch available coupons" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
