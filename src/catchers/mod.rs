use crate::routes::StatusBody;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::Request;

/// Renders framework-level failures with the same envelope as handler errors.
#[catch(default)]
pub fn default_catcher(status: Status, req: &Request) -> (Status, Json<StatusBody>) {
    tracing::warn!(status = status.code, uri = %req.uri(), "Request failed before reaching a handler");
    (status, Json(StatusBody::error(status.reason_lossy())))
}
