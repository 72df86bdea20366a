pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::pagination::Pagination};

    pub struct Payload {
        pub pagination: Pagination,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{modules::order::repository::Order, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Deliveries(Paginated<Order>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Deliveries(orders) => (StatusCode::OK, Json(json!(orders))).into_response(),
            }
        }
    }

    pub enum Error {
        NotADeliveryPartner,
        FailedToFetchDeliveries,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::NotADeliveryPartner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only delivery partners can view available deliveries" })),
                )
                    .into_response(),
                Self::FailedToFetchDeliveries => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch available deliveries" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
