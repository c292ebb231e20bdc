use crate::schema::users;
use diesel::{AsChangeset, Insertable, Queryable};

#[derive(Queryable)]
pub struct User {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub contact: Option<String>,
    pub image_uri: Option<String>,
    pub notif_water: Option<i32>,
    pub notif_meds: Option<i32>,
    pub notif_practice: Option<i32>,
    pub notif_news: Option<i32>,
    pub notif_sound: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = users, treat_none_as_default_value = false)]
/// SQLite accepts NULL in a TEXT primary key, so an account may lack an email.
pub struct NewUser<'a> {
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub name: Option<&'a str>,
}

/// Full overwrite of the profile columns; `None` clears the column.
#[derive(AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub contact: Option<String>,
    pub image_uri: Option<String>,
    pub notif_water: Option<i32>,
    pub notif_meds: Option<i32>,
    pub notif_practice: Option<i32>,
    pub notif_news: Option<i32>,
    pub notif_sound: Option<i32>,
}

/// Notification flags are stored as 0/1 integers.
pub fn flag_to_column(flag: Option<bool>) -> Option<i32> {
    flag.map(i32::from)
}

/// A NULL column reads as `false`.
pub fn column_to_flag(column: Option<i32>) -> bool {
    column.map_or(false, |value| value != 0)
}
