pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1))]
        pub menu_item_id: String,
        #[validate(range(min = 0, max = 50))]
        pub quantity: i32,
        pub replace: Option<bool>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{modules::cart::service::PricedCart, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        CartUpdated { id: String, priced: PricedCart },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CartUpdated { id, priced } => (
                    StatusCode::OK,
                    Json(json!({
                        "id": id,
                        "restaurant_id": priced.restaurant_id,
                        "items": priced.lines,
                        "sub_total": priced.sub_total,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MenuItemNotFound,
        MenuItemUnavailable,
        CartHoldsAnotherRestaurant,
        InvalidQuantity,
        FailedToUpdateCart,
        FailedToValidate(ValidationErrors),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Menu item not found" })),
                )
                    .into_response(),
                Self::MenuItemUnavailable => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Menu item is currently unavailable" })),
                )
                    .into_response(),
                Self::CartHoldsAnotherRestaurant => (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "Your cart has items from another restaurant. Send replace=true to start a new cart"
                    })),
                )
                    .into_response(),
                Self::InvalidQuantity => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid quantity" })),
                )
                    .into_response(),
                Self::FailedToUpdateCart => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update cart" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
