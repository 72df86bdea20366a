pub mod request {
    use crate::{
        modules::{
            auth::middleware::Auth,
            order::repository::{OrderSimpleStatus, OrderStatus},
        },
        utils::pagination::Pagination,
    };
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Query {
        pub status: Option<OrderStatus>,
        pub simple_status: Option<OrderSimpleStatus>,
        pub as_restaurant: Option<bool>,
    }

    pub struct Payload {
        pub pagination: Pagination,
        pub query: Query,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{modules::order::repository::Order, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Orders(Paginated<Order>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Orders(orders) => (StatusCode::OK, Json(json!(orders))).into_response(),
            }
        }
    }

    pub enum Error {
        UserDoesNotOwnRestaurant,
        FailedToFetchOrders,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserDoesNotOwnRestaurant => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "You don't own a restaurant" })),
                )
                    .into_response(),
                Self::FailedToFetchOrders => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch orders" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
