use crate::schema::practice_records;
use diesel::{
    ExpressionMethods, Insertable, QueryDsl, QueryResult, Queryable, RunQueryDsl, SqliteConnection,
};

#[derive(Debug, Queryable, serde::Serialize)]
pub struct PracticeEntry {
    pub name: Option<String>,
    pub date: Option<String>,
    pub duration: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = practice_records, treat_none_as_default_value = false)]
pub struct NewPracticeRecord {
    pub email: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub duration: Option<String>,
}

#[tracing::instrument(name = "Loading practice history", skip(conn))]
pub fn practice_history(
    conn: &mut SqliteConnection,
    email: &str,
) -> QueryResult<Vec<PracticeEntry>> {
    use crate::schema::practice_records::dsl;
    dsl::practice_records
        .select((dsl::name, dsl::date, dsl::duration))
        .filter(dsl::email.eq(email))
        .order(dsl::id)
        .load::<PracticeEntry>(conn)
}
