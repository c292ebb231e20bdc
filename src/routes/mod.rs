mod account;
mod admin;
mod error;
mod index;
mod pain;
mod practice;

pub use account::*;
pub use admin::*;
pub use error::*;
pub use index::*;
pub use pain::*;
pub use practice::*;

use rocket::serde::json::{Error as JsonError, Json};

/// Body of every non-report response: `{"status": ..., "message"?: ...}`.
#[derive(Debug, serde::Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusBody {
    pub fn ok() -> Self {
        StatusBody {
            status: "ok",
            message: None,
        }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        StatusBody {
            status: "ok",
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        StatusBody {
            status: "error",
            message: Some(message.into()),
        }
    }
}

/// Unwraps a JSON body, turning a parse failure into a validation error.
fn json_body<T>(body: Result<Json<T>, JsonError<'_>>) -> Result<T, ApiError> {
    body.map(Json::into_inner)
        .map_err(|e| ApiError::Validation(e.to_string()))
}
