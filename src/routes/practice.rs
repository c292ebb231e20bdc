use crate::field_attributes::deserialize_option_string_from_scalar;
use crate::models::NewPracticeRecord;
use crate::routes::{json_body, ApiError, StatusBody};
use crate::schema::wait_for_lock;
use crate::startup::CuidArtriteDbConn;
use anyhow::Context;
use diesel::{QueryResult, RunQueryDsl, SqliteConnection};
use rocket::http::Status;
use rocket::serde::json::{Error as JsonError, Json};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct PracticeBody {
    email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    duration: Option<String>,
}

#[tracing::instrument(
    name = "Recording a practice session",
    skip(body, conn),
    fields(request_id = %Uuid::new_v4(), user_email = tracing::field::Empty)
)]
#[post("/add_practice", data = "<body>")]
pub async fn add_practice(
    body: Result<Json<PracticeBody>, JsonError<'_>>,
    conn: CuidArtriteDbConn,
) -> Result<(Status, Json<StatusBody>), ApiError> {
    let body = json_body(body)?;
    if let Some(email) = &body.email {
        tracing::Span::current().record("user_email", &tracing::field::display(email));
    }
    let record = NewPracticeRecord {
        email: body.email,
        name: body.name,
        date: body.date,
        duration: body.duration,
    };

    conn.run(move |c| insert_practice_record(c, &record))
        .await
        .context("Failed to save the practice record.")?;

    Ok((Status::Created, Json(StatusBody::ok())))
}

#[tracing::instrument(name = "Inserting practice record", skip(conn, record))]
fn insert_practice_record(
    conn: &mut SqliteConnection,
    record: &NewPracticeRecord,
) -> QueryResult<usize> {
    use crate::schema::practice_records;
    wait_for_lock(conn)?;
    diesel::insert_into(practice_records::table)
        .values(record)
        .execute(conn)
}
