use crate::routes::StatusBody;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::Request;

#[derive(thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(DieselError),
    #[error("Login falhou")]
    Unauthorized,
    #[error("{0:#}")]
    StorageUnavailable(#[from] anyhow::Error),
}

impl ApiError {
    /// Unique violations become `Conflict`; anything else is a storage failure.
    pub fn from_insert(error: DieselError, context: &'static str) -> Self {
        match error {
            e @ DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ApiError::Conflict(e)
            }
            e => ApiError::StorageUnavailable(anyhow::Error::new(e).context(context)),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            // The mobile client treats any 400 on registration as "already taken".
            ApiError::Validation(_) | ApiError::Conflict(_) => Status::BadRequest,
            ApiError::Unauthorized => Status::Unauthorized,
            ApiError::StorageUnavailable(_) => Status::InternalServerError,
        }
    }
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        tracing::warn!("ApiError: {:?}", self);
        (self.status(), Json(StatusBody::error(self.to_string()))).respond_to(request)
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
