pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_time_of_day};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 255))]
        pub name: Option<String>,
        #[validate(length(max = 2000))]
        pub description: Option<String>,
        #[validate(length(min = 1))]
        pub address: Option<String>,
        #[validate(length(min = 7, max = 32))]
        pub phone_number: Option<String>,
        #[validate(length(min = 1, max = 100))]
        pub cuisine: Option<String>,
        #[validate(range(min = -90.0, max = 90.0))]
        pub latitude: Option<f64>,
        #[validate(range(min = -180.0, max = 180.0))]
        pub longitude: Option<f64>,
        #[validate(custom(function = "validate_time_of_day"))]
        pub opening_time: Option<String>,
        #[validate(custom(function = "validate_time_of_day"))]
        pub closing_time: Option<String>,
        pub is_open: Option<bool>,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{modules::restaurant::repository::Restaurant, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        RestaurantUpdated(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantUpdated(restaurant) => {
                    (StatusCode::OK, Json(json!(restaurant))).into_response()
                }
            }
        }
    }

    pub enum Error {
        RestaurantNotFound,
        UserNotOwner,
        FailedToUpdateRestaurant,
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
                Self::FailedToUpdateRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update restaurant" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
