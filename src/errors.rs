use thiserror::Error;

/// Failure reported by the page the toast layer is running in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("document is not available")]
    NoDocument,
    #[error("local storage is not available")]
    StorageUnavailable,
    #[error("storage operation failed: {0}")]
    Storage(String),
    #[error("dom operation failed: {0}")]
    Dom(String),
    #[error("form could not be inspected: {0}")]
    FormInspection(String),
}

/// Reasons a stored claim intent is ignored.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("claim intent is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("claim intent is {age_ms}ms old")]
    Expired { age_ms: i64 },
}

#[cfg(feature = "server")]
pub use server::AppError;

#[cfg(feature = "server")]
mod server {
    use axum::http::StatusCode;

    #[derive(Debug)]
    pub struct AppError {
        pub status: StatusCode,
        pub message: String,
    }

    impl AppError {
        pub fn bad_request(message: impl Into<String>) -> Self {
            Self {
                status: StatusCode::BAD_REQUEST,
                message: message.into(),
            }
        }

        pub fn not_found(message: impl Into<String>) -> Self {
            Self {
                status: StatusCode::NOT_FOUND,
                message: message.into(),
            }
        }

        pub fn internal(err: impl std::error::Error) -> Self {
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            }
        }
    }

    impl From<std::io::Error> for AppError {
        fn from(err: std::io::Error) -> Self {
            Self::internal(err)
        }
    }

    impl axum::response::IntoResponse for AppError {
        fn into_response(self) -> axum::response::Response {
            (self.status, self.message).into_response()
        }
    }
}
