pub mod request {
    use crate::modules::user::repository::Role;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(email)]
        pub email: String,
        #[validate(length(min = 1, max = 100))]
        pub first_name: Option<String>,
        #[validate(length(min = 1, max = 100))]
        pub last_name: Option<String>,
        pub role: Option<Role>,
    }
}

pub mod response {
    use crate::{
        modules::{auth::repository::Session, user::repository::User},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        Session { session: Session, user: User },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Session { session, user } => (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": session.access_token,
                        "expires_at": session.access_token_expires_at,
                        "user": user,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToCreateSession,
        FailedToFetchUser,
        FailedToValidate(ValidationErrors),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToCreateSession => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create session" })),
                )
                    .into_response(),
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
