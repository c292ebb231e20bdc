use crate::field_attributes::{deserialize_option_integer, deserialize_option_string_from_scalar};
use crate::models::NewPainRecord;
use crate::routes::{json_body, ApiError, StatusBody};
use crate::schema::wait_for_lock;
use crate::startup::CuidArtriteDbConn;
use anyhow::Context;
use diesel::{
    ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SqliteConnection,
};
use rocket::http::Status;
use rocket::serde::json::{Error as JsonError, Json};
use uuid::Uuid;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PainBody {
    email: Option<String>,
    /// Short date label such as "02/12"; one record is kept per label and email.
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_integer")]
    level: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    full_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    location_count: Option<String>,
}

impl From<PainBody> for NewPainRecord {
    fn from(body: PainBody) -> Self {
        NewPainRecord {
            email: body.email,
            level: body.level,
            date: body.date,
            full_date: body.full_date,
            location_count: body.location_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PainUpsert {
    Created,
    Updated,
}

impl PainUpsert {
    pub fn message(self) -> &'static str {
        match self {
            PainUpsert::Created => "Registro criado",
            PainUpsert::Updated => "Registro atualizado",
        }
    }
}

#[tracing::instrument(
    name = "Recording a pain level",
    skip(body, conn),
    fields(
        request_id = %Uuid::new_v4(),
        user_email = tracing::field::Empty,
        short_date = tracing::field::Empty
    )
)]
#[post("/add_pain", data = "<body>")]
pub async fn add_pain(
    body: Result<Json<PainBody>, JsonError<'_>>,
    conn: CuidArtriteDbConn,
) -> Result<(Status, Json<StatusBody>), ApiError> {
    let record: NewPainRecord = json_body(body)?.into();
    let span = tracing::Span::current();
    if let Some(email) = &record.email {
        span.record("user_email", &tracing::field::display(email));
    }
    if let Some(date) = &record.date {
        span.record("short_date", &tracing::field::display(date));
    }

    let outcome = conn
        .run(move |c| upsert_pain_record(c, &record))
        .await
        .context("Failed to save the pain record.")?;

    Ok((Status::Created, Json(StatusBody::ok_with(outcome.message()))))
}

/// Overwrites the record for (email, short date) if there is one, else inserts.
///
/// Runs under `BEGIN IMMEDIATE` so two writers for the same day cannot both
/// miss the lookup and insert twice.
#[tracing::instrument(name = "Upserting pain record", skip(conn, record))]
pub fn upsert_pain_record(
    conn: &mut SqliteConnection,
    record: &NewPainRecord,
) -> QueryResult<PainUpsert> {
    use crate::schema::pain_records::dsl::*;
    wait_for_lock(conn)?;
    conn.immediate_transaction(|c| {
        let existing = pain_records
            .select(id)
            .filter(email.eq(&record.email))
            .filter(date.eq(&record.date))
            .first::<i32>(c)
            .optional()?;
        match existing {
            Some(record_id) => {
                diesel::update(pain_records.find(record_id))
                    .set((
                        level.eq(record.level),
                        full_date.eq(&record.full_date),
                        location_count.eq(&record.location_count),
                    ))
                    .execute(c)?;
                Ok(PainUpsert::Updated)
            }
            None => {
                diesel::insert_into(pain_records).values(record).execute(c)?;
                Ok(PainUpsert::Created)
            }
        }
    })
}
