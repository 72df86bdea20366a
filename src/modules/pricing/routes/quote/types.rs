pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(range(min = -90.0, max = 90.0))]
        pub latitude: f64,
        #[validate(range(min = -180.0, max = 180.0))]
        pub longitude: f64,
        #[validate(length(max = 20))]
        pub coupon_code: Option<String>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{
        modules::pricing::service::{CartQuote, CartQuoteError},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        Quote(CartQuote),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Quote(cart_quote) => (
                    StatusCode::OK,
                    Json(json!({
                        "restaurant_id": cart_quote.restaurant.id,
                        "items": cart_quote.priced.lines,
                        "coupon_code": cart_quote.coupon.map(|coupon| coupon.code),
                        "quote": cart_quote.quote,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        CartNotQuotable(CartQuoteError),
        FailedToValidate(ValidationErrors),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CartNotQuotable(err) => err.into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
