pub mod request {
    use crate::utils::validation::validate_positive_amount;
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 20))]
        pub code: String,
        #[validate(custom(function = "validate_positive_amount"))]
        pub sub_total: BigDecimal,
        #[validate(length(min = 1))]
        pub restaurant_id: String,
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::coupon::{repository::Coupon, service},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        CouponApplicable {
            coupon: Coupon,
            discount: BigDecimal,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CouponApplicable { coupon, discount } => (
                    StatusCode::OK,
                    Json(json!({
                        "code": coupon.code,
                        "description": coupon.description,
                        "discount_type": coupon.discount_type,
                        "discount": discount,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        CouponNotFound,
        CouponNotApplicable(service::Error),
        FailedToValidateCoupon,
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
                Self::CouponNotApplicable(err) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": err.message() })),
                )
                    .into_response(),
                Self::FailedToValidateCoupon => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to validate coupon" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
