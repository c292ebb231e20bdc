use crate::field_attributes::{deserialize_option_flag, deserialize_option_string_from_scalar};
use crate::models::{
    column_to_flag, flag_to_column, pain_history, practice_history, NewUser, PainEntry,
    PracticeEntry, ProfileChanges, User,
};
use crate::routes::{json_body, ApiError, StatusBody};
use crate::schema::wait_for_lock;
use crate::startup::CuidArtriteDbConn;
use anyhow::Context;
use diesel::{
    Connection, ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl,
    SqliteConnection,
};
use rocket::http::Status;
use rocket::serde::json::{Error as JsonError, Json};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct RegisterBody {
    email: Option<String>,
    password: Option<Secret<String>>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    name: Option<String>,
}

#[tracing::instrument(
    name = "Registering a new user",
    skip(body, conn),
    fields(request_id = %Uuid::new_v4(), user_email = tracing::field::Empty)
)]
#[post("/register", data = "<body>")]
pub async fn register(
    body: Result<Json<RegisterBody>, JsonError<'_>>,
    conn: CuidArtriteDbConn,
) -> Result<(Status, Json<StatusBody>), ApiError> {
    let body = json_body(body)?;
    if let Some(email) = &body.email {
        tracing::Span::current().record("user_email", &tracing::field::display(email));
    }
    let (email, password, name) = (body.email, body.password, body.name);

    conn.run(move |c| {
        insert_user(
            c,
            &NewUser {
                email: email.as_deref(),
                password: password.as_ref().map(|p| p.expose_secret().as_str()),
                name: name.as_deref(),
            },
        )
    })
    .await
    .map_err(|e| ApiError::from_insert(e, "Failed to insert new user."))?;

    Ok((Status::Created, Json(StatusBody::ok_with("Criado"))))
}

#[tracing::instrument(name = "Saving new user details in the database", skip(conn, new_user))]
fn insert_user(conn: &mut SqliteConnection, new_user: &NewUser) -> QueryResult<usize> {
    use crate::schema::users;
    wait_for_lock(conn)?;
    diesel::insert_into(users::table)
        .values(new_user)
        .execute(conn)
}

#[derive(serde::Deserialize)]
pub struct LoginBody {
    email: Option<String>,
    password: Option<Secret<String>>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub status: &'static str,
    pub user_name: Option<String>,
    pub birth_year: String,
    pub gender: String,
    pub contact: String,
    pub image_uri: String,
    pub notif_water: bool,
    pub notif_meds: bool,
    pub notif_practice: bool,
    pub notif_news: bool,
    pub notif_sound: bool,
    pub pain_history: Vec<PainEntry>,
    pub practices_history: Vec<PracticeEntry>,
}

impl LoginResponse {
    fn new(user: User, pain_history: Vec<PainEntry>, practices_history: Vec<PracticeEntry>) -> Self {
        LoginResponse {
            status: "ok",
            user_name: user.name,
            birth_year: user.birth_year.unwrap_or_default(),
            gender: user.gender.unwrap_or_default(),
            contact: user.contact.unwrap_or_default(),
            image_uri: user.image_uri.unwrap_or_default(),
            notif_water: column_to_flag(user.notif_water),
            notif_meds: column_to_flag(user.notif_meds),
            notif_practice: column_to_flag(user.notif_practice),
            notif_news: column_to_flag(user.notif_news),
            notif_sound: column_to_flag(user.notif_sound),
            pain_history,
            practices_history,
        }
    }
}

#[tracing::instrument(
    name = "Logging a user in",
    skip(body, conn),
    fields(request_id = %Uuid::new_v4(), user_email = tracing::field::Empty)
)]
#[post("/login", data = "<body>")]
pub async fn login(
    body: Result<Json<LoginBody>, JsonError<'_>>,
    conn: CuidArtriteDbConn,
) -> Result<Json<LoginResponse>, ApiError> {
    let body = json_body(body)?;
    let (email, password) = match (body.email, body.password) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(ApiError::Unauthorized),
    };
    tracing::Span::current().record("user_email", &tracing::field::display(&email));

    let profile = conn
        .run(move |c| load_profile(c, &email, &password))
        .await
        .context("Failed to load the user profile.")?;

    match profile {
        Some((user, pains, practices)) => Ok(Json(LoginResponse::new(user, pains, practices))),
        None => Err(ApiError::Unauthorized),
    }
}

/// Credential check plus both histories, read inside one transaction.
#[tracing::instrument(name = "Loading user profile", skip(conn, password))]
fn load_profile(
    conn: &mut SqliteConnection,
    email: &str,
    password: &Secret<String>,
) -> QueryResult<Option<(User, Vec<PainEntry>, Vec<PracticeEntry>)>> {
    use crate::schema::users;
    conn.transaction(|c| {
        let user = users::table
            .filter(users::email.eq(email))
            .filter(users::password.eq(password.expose_secret()))
            .first::<User>(c)
            .optional()?;
        match user {
            Some(user) => {
                let pains = pain_history(c, email)?;
                let practices = practice_history(c, email)?;
                Ok(Some((user, pains, practices)))
            }
            None => Ok(None),
        }
    })
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    user_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    user_birth_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    user_gender: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    user_contact: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_scalar")]
    profile_image_uri_string: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_flag")]
    notif_water: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_option_flag")]
    notif_meds: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_option_flag")]
    notif_practice: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_option_flag")]
    notif_news: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_option_flag")]
    notif_sound: Option<bool>,
}

impl UpdateUserBody {
    /// Splits the target email from the columns it overwrites.
    fn into_changes(self) -> (Option<String>, ProfileChanges) {
        let changes = ProfileChanges {
            name: self.user_name,
            birth_year: self.user_birth_year,
            gender: self.user_gender,
            contact: self.user_contact,
            image_uri: self.profile_image_uri_string,
            notif_water: flag_to_column(self.notif_water),
            notif_meds: flag_to_column(self.notif_meds),
            notif_practice: flag_to_column(self.notif_practice),
            notif_news: flag_to_column(self.notif_news),
            notif_sound: flag_to_column(self.notif_sound),
        };
        (self.email, changes)
    }
}

#[tracing::instrument(
    name = "Updating a user profile",
    skip(body, conn),
    fields(request_id = %Uuid::new_v4(), user_email = tracing::field::Empty)
)]
#[post("/update_user", data = "<body>")]
pub async fn update_user(
    body: Result<Json<UpdateUserBody>, JsonError<'_>>,
    conn: CuidArtriteDbConn,
) -> Result<Json<StatusBody>, ApiError> {
    let (email, changes) = json_body(body)?.into_changes();
    let email = match email {
        Some(email) => email,
        None => {
            tracing::info!("No email given, nothing to update");
            return Ok(Json(StatusBody::ok()));
        }
    };
    tracing::Span::current().record("user_email", &tracing::field::display(&email));

    let updated = conn
        .run(move |c| overwrite_profile(c, &email, &changes))
        .await
        .context("Failed to update the user profile.")?;
    if updated == 0 {
        tracing::info!("No user matched the given email");
    }
    Ok(Json(StatusBody::ok()))
}

#[tracing::instrument(name = "Overwriting user profile", skip(conn, changes))]
fn overwrite_profile(
    conn: &mut SqliteConnection,
    email: &str,
    changes: &ProfileChanges,
) -> QueryResult<usize> {
    use crate::schema::users;
    wait_for_lock(conn)?;
    diesel::update(users::table.filter(users::email.eq(email)))
        .set(changes)
        .execute(conn)
}
