use crate::models::{pain_history, practice_history, PainEntry, PracticeEntry};
use crate::routes::ApiError;
use crate::startup::CuidArtriteDbConn;
use anyhow::Context;
use diesel::{QueryDsl, QueryResult, RunQueryDsl, SqliteConnection};
use rocket::serde::json::Json;
use uuid::Uuid;

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReport {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub pain_history: Vec<PainEntry>,
    pub practices_history: Vec<PracticeEntry>,
}

#[tracing::instrument(name = "Building the full data report", skip(conn), fields(request_id = %Uuid::new_v4()))]
#[get("/admin/get_all_data")]
pub async fn get_all_data(conn: CuidArtriteDbConn) -> Result<Json<Vec<UserReport>>, ApiError> {
    let report = conn
        .run(|c| load_report(c))
        .await
        .context("Failed to load the data report.")?;
    tracing::info!(users = report.len(), "Report assembled");
    Ok(Json(report))
}

/// One query for the users, then two per user for their histories.
fn load_report(conn: &mut SqliteConnection) -> QueryResult<Vec<UserReport>> {
    use crate::schema::users;
    let accounts = users::table
        .select((users::email, users::name))
        .load::<(Option<String>, Option<String>)>(conn)?;

    accounts
        .into_iter()
        .map(|(email, user_name)| {
            // A NULL email matches no history row.
            let (pain_history, practices_history) = match &email {
                Some(email) => (pain_history(conn, email)?, practice_history(conn, email)?),
                None => (Vec::new(), Vec::new()),
            };
            Ok(UserReport {
                user_name,
                email,
                pain_history,
                practices_history,
            })
        })
        .collect()
}
