use crate::schema::pain_records;
use diesel::{
    ExpressionMethods, Insertable, QueryDsl, QueryResult, Queryable, RunQueryDsl, SqliteConnection,
};

/// One row of a user's pain history, as rendered in login and report bodies.
#[derive(Debug, Queryable, serde::Serialize)]
pub struct PainEntry {
    pub level: Option<i32>,
    pub date: Option<String>,
    pub full_date: Option<String>,
    pub location_count: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = pain_records, treat_none_as_default_value = false)]
pub struct NewPainRecord {
    pub email: Option<String>,
    pub level: Option<i32>,
    pub date: Option<String>,
    pub full_date: Option<String>,
    pub location_count: Option<String>,
}

#[tracing::instrument(name = "Loading pain history", skip(conn))]
pub fn pain_history(conn: &mut SqliteConnection, email: &str) -> QueryResult<Vec<PainEntry>> {
    use crate::schema::pain_records::dsl;
    dsl::pain_records
        .select((dsl::level, dsl::date, dsl::full_date, dsl::location_count))
        .filter(dsl::email.eq(email))
        .order(dsl::id)
        .load::<PainEntry>(conn)
}
