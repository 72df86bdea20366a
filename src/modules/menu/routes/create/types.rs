pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_positive_amount};
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 255))]
        pub name: String,
        #[validate(length(max = 2000))]
        pub description: Option<String>,
        #[validate(custom(function = "validate_positive_amount"))]
        pub price: BigDecimal,
        #[validate(length(min = 1, max = 100))]
        pub category: String,
        pub is_veg: Option<bool>,
    }

    pub struct Payload {
        pub restaurant_id: String,
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{modules::menu::repository::MenuItem, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        MenuItemCreated(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemCreated(item) => (StatusCode::CREATED, Json(json!(item))).into_response(),
            }
        }
    }

    pub enum Error {
        RestaurantNotFound,
        UserNotOwner,
        FailedToCreateMenuItem,
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
                Self::UserNotOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "User does not own this restaurant" })),
                )
                    .into_response(),
                Self::FailedToCreateMenuItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create menu item" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
