pub mod request {
    use crate::modules::{auth::middleware::Auth, order::repository::OrderStatus};
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub status: OrderStatus,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::order::{repository::Order, service};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        OrderStatusUpdated(Order),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderStatusUpdated(order) => {
                    (StatusCode::OK, Json(json!(order))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToUpdateOrderStatus(service::Error),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToUpdateOrderStatus(err) => err.into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
