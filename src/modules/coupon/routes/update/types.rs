pub mod request {
    use crate::utils::validation::{validate_money, validate_positive_amount};
    use bigdecimal::BigDecimal;
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(max = 500))]
        pub description: Option<String>,
        pub is_active: Option<bool>,
        #[validate(custom(function = "validate_positive_amount"))]
        pub max_discount: Option<BigDecimal>,
        #[validate(custom(function = "validate_money"))]
        pub min_order_value: Option<BigDecimal>,
        pub valid_from: Option<DateTime<Utc>>,
        pub valid_until: Option<DateTime<Utc>>,
        #[validate(range(min = 1))]
        pub usage_limit: Option<i32>,
        pub clear_max_discount: Option<bool>,
        pub clear_usage_limit: Option<bool>,
    }

    impl Body {
        /// Whether the request both sets and clears the same limit.
        pub fn has_conflicting_limits(&self) -> bool {
            (self.clear_max_discount.unwrap_or(false) && self.max_discount.is_some())
                || (self.clear_usage_limit.unwrap_or(false) && self.usage_limit.is_some())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Body;
        use serde_json::json;

        fn body(value: serde_json::Value) -> Body {
            serde_json::from_value(value).unwrap()
        }

        #[test]
        fn clearing_a_limit_alone_is_fine() {
            assert!(!body(json!({ "clear_usage_limit": true })).has_conflicting_limits());
            assert!(!body(json!({ "clear_max_discount": true, "usage_limit": 5 }))
                .has_conflicting_limits());
            assert!(!body(json!({ "clear_usage_limit": false, "usage_limit": 5 }))
                .has_conflicting_limits());
        }

        #[test]
        fn setting_and_clearing_the_same_limit_conflicts() {
            assert!(body(json!({ "clear_usage_limit": true, "usage_limit": 5 }))
                .has_conflicting_limits());
            assert!(body(json!({ "clear_max_discount": true, "max_discount": "100" }))
                .has_conflicting_limits());
        }
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::coupon::repository::Coupon, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        CouponUpdated(Coupon),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CouponUpdated(coupon) => (StatusCode::OK, Json(json!(coupon))).into_response(),
            }
        }
    }

    pub enum Error {
        CouponNotFound,
        InvalidMinimumOrderValue,
        InvalidValidityWindow,
        ConflictingLimits,
        FailedToUpdateCoupon,
        FailedToValidate(ValidationErrors),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CouponNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Coupon not found" })),
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
                Self::ConflictingLimits => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "A limit cannot be set and cleared at once" })),
                )
                    .into_response(),
                Self::FailedToUpdateCoupon => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update coupon" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
