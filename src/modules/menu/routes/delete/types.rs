pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub id: String,
        pub auth: Auth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        MenuItemDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Menu item deleted successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MenuItemNotFound,
        UserNotOwner,
        FailedToDeleteMenuItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Menu item not found" })),
                )
                    .into_response(),
                Self::UserNotOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "User does not own this menu item" })),
                )
                    .into_response(),
                Self::FailedToDeleteMenuItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
