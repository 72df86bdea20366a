pub mod request {
    use crate::modules::{auth::middleware::Auth, order::repository::PaymentMethod};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 500))]
        pub delivery_address: String,
        #[validate(range(min = -90.0, max = 90.0))]
        pub latitude: f64,
        #[validate(range(min = -180.0, max = 180.0))]
        pub longitude: f64,
        pub payment_method: PaymentMethod,
        #[validate(length(max = 20))]
        pub coupon_code: Option<String>,
        #[validate(length(max = 500))]
        pub note: Option<String>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{
        modules::{
            coupon,
            order::repository::Order,
            pricing::service::CartQuoteError,
        },
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OrderPlaced(Order),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderPlaced(order) => (StatusCode::CREATED, Json(json!(order))).into_response(),
            }
        }
    }

    pub enum Error {
        CartNotQuotable(CartQuoteError),
        FailedToPlaceOrder,
        FailedToValidate(ValidationErrors),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CartNotQuotable(err) => err.into_response(),
                Self::FailedToPlaceOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to place order" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    impl From<coupon::service::Error> for Error {
        fn from(err: coupon::service::Error) -> Self {
            Self::CartNotQuotable(CartQuoteError::CouponNotApplicable(err))
        }
    }

    pub type Response = Result<Success, Error>;
}
