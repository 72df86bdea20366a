pub mod request {
    use crate::{
        modules::coupon::repository::DiscountType,
        utils::validation::{validate_coupon_code, validate_money, validate_positive_amount},
    };
    use bigdecimal::BigDecimal;
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(custom(function = "validate_coupon_code"))]
        pub code: String,
        #[validate(length(max = 500))]
        pub description: Option<String>,
        pub discount_type: DiscountType,
        #[validate(custom(function = "validate_positive_amount"))]
        pub value: BigDecimal,
        #[validate(custom(function = "validate_positive_amount"))]
        pub max_discount: Option<BigDecimal>,
        #[validate(custom(function = "validate_money"))]
        pub min_order_value: Option<BigDecimal>,
        pub valid_from: Option<DateTime<Utc>>,
        pub valid_until: DateTime<Utc>,
        #[validate(range(min = 1))]
        pub usage_limit: Option<i32>,
        pub restaurant_id: Option<String>,
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::coupon::repository::Coupon, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        CouponCreated(Coupon),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CouponCreated(coupon) => {
                    (StatusCode::CREATED, Json(json!(coupon))).into_response()
                }
            }
        }
    }

    pub enum Error {
        DuplicateCode,
        InvalidPercentage,
        InvalidMinimumOrderValue,
        InvalidValidityWindow,
        RestaurantNotFound,
        FailedToCreateCoupon,
        FailedToValidate(ValidationErrors),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DuplicateCode => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "A coupon with this code already exists" })),
                )
                    .into_response(),
                Self::InvalidPercentage => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Percentage discounts cannot exceed 100" })),
                )
                    .into_response(),
                Self::InvalidMinimumOrderValue => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Minimum order value cannot be negative" })),
                )
                    .into_response(),
                Self::InvalidValidityWindow => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "valid_until must be after valid_from" })),
                )
                    .into_response(),
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::FailedToCreateCoupon => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create coupon" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
