pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub restaurant_id: String,
        pub auth: Option<Auth>,
    }
}

pub mod response {
    use crate::modules::menu::repository::MenuItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Menu(Vec<MenuItem>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Menu(items) => (StatusCode::OK, Json(json!({ "items": items }))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchMenu,
        RestaurantNotFound,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchMenu => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch menu" })),
                )
                    .into_response(),
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
