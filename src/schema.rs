use diesel::connection::SimpleConnection;
use diesel::{QueryResult, SqliteConnection};

table! {
    users (email) {
        email -> Nullable<Text>,
        password -> Nullable<Text>,
        name -> Nullable<Text>,
        birth_year -> Nullable<Text>,
        gender -> Nullable<Text>,
        contact -> Nullable<Text>,
        image_uri -> Nullable<Text>,
        notif_water -> Nullable<Integer>,
        notif_meds -> Nullable<Integer>,
        notif_practice -> Nullable<Integer>,
        notif_news -> Nullable<Integer>,
        notif_sound -> Nullable<Integer>,
    }
}

table! {
    pain_records (id) {
        id -> Integer,
        email -> Nullable<Text>,
        level -> Nullable<Integer>,
        date -> Nullable<Text>,
        full_date -> Nullable<Text>,
        location_count -> Nullable<Text>,
    }
}

table! {
    practice_records (id) {
        id -> Integer,
        email -> Nullable<Text>,
        name -> Nullable<Text>,
        date -> Nullable<Text>,
        duration -> Nullable<Text>,
    }
}

allow_tables_to_appear_in_same_query!(users, pain_records, practice_records);

const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS users (
    email TEXT PRIMARY KEY,
    password TEXT,
    name TEXT,
    birth_year TEXT,
    gender TEXT,
    contact TEXT,
    image_uri TEXT,
    notif_water INTEGER,
    notif_meds INTEGER,
    notif_practice INTEGER,
    notif_news INTEGER,
    notif_sound INTEGER
);
CREATE TABLE IF NOT EXISTS pain_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT,
    level INTEGER,
    date TEXT,
    full_date TEXT,
    location_count TEXT
);
CREATE TABLE IF NOT EXISTS practice_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT,
    name TEXT,
    date TEXT,
    duration TEXT
);
";

#[tracing::instrument(name = "Creating tables", skip(conn))]
pub fn create_tables(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(CREATE_TABLES)
}

/// Writers wait this long for SQLite's file lock before failing with `SQLITE_BUSY`.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Per-connection setting; cheap enough to repeat before every write.
pub fn wait_for_lock(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))
}
