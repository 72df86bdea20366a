pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_time_of_day};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 255))]
        pub name: String,
        #[validate(length(max = 2000))]
        pub description: Option<String>,
        #[validate(length(min = 1))]
        pub address: String,
        #[validate(length(min = 7, max = 32))]
        pub phone_number: String,
        #[validate(length(min = 1, max = 100))]
        pub cuisine: String,
        #[validate(range(min = -90.0, max = 90.0))]
        pub latitude: f64,
        #[validate(range(min = -180.0, max = 180.0))]
        pub longitude: f64,
        #[validate(custom(function = "validate_time_of_day"))]
        pub opening_time: String,
        #[validate(custom(function = "validate_time_of_day"))]
        pub closing_time: String,
    }

    pub struct Payload {
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
        RestaurantCreated(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantCreated(restaurant) => {
                    (StatusCode::CREATED, Json(json!(restaurant))).into_response()
                }
            }
        }
    }

    pub enum Error {
        AlreadyCreatedRestaurant,
        NotARestaurantOwner,
        FailedToCreateRestaurant,
        FailedToValidate(ValidationErrors),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AlreadyCreatedRestaurant => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "You've already created a restaurant" })),
                )
                    .into_response(),
                Self::NotARestaurantOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only restaurant owners can create restaurants" })),
                )
                    .into_response(),
                Self::FailedToCreateRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create restaurant" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
