use crate::helpers::spawn_app;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use serde_json::json;

#[tokio::test]
async fn update_user_overwrites_the_profile() {
    // arrange
    let app = spawn_app().await;
    app.register_user("a@x.com").await;

    // act
    let response = app
        .post_update_user(&json!({
            "email": "a@x.com",
            "userName": "Ana Maria",
            "userBirthYear": "1960",
            "userGender": "F",
            "userContact": "555-0100",
            "profileImageUriString": "content://photo/1",
            "notifWater": true,
            "notifMeds": false,
            "notifPractice": true,
            "notifNews": false,
            "notifSound": true,
        }))
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    let profile = app.login_body("a@x.com").await;
    assert_eq!(profile["userName"], "Ana Maria");
    assert_eq!(profile["birthYear"], "1960");
    assert_eq!(profile["gender"], "F");
    assert_eq!(profile["contact"], "555-0100");
    assert_eq!(profile["imageUri"], "content://photo/1");
    assert_eq!(profile["notifWater"], true);
    assert_eq!(profile["notifMeds"], false);
    assert_eq!(profile["notifPractice"], true);
    assert_eq!(profile["notifNews"], false);
    assert_eq!(profile["notifSound"], true);
}

#[tokio::test]
async fn update_user_clears_fields_left_out_of_the_body() {
    // arrange
    let app = spawn_app().await;
    app.register_user("a@x.com").await;

    // act
    app.post_update_user(&json!({ "email": "a@x.com", "userGender": "F" }))
        .await;

    // assert
    let profile = app.login_body("a@x.com").await;
    assert_eq!(profile["userName"], serde_json::Value::Null);
    assert_eq!(profile["gender"], "F");
}

#[tokio::test]
async fn update_user_for_an_unknown_email_reports_success_and_changes_nothing() {
    // arrange
    let app = spawn_app().await;
    app.register_user("a@x.com").await;

    // act
    let response = app
        .post_update_user(&json!({ "email": "nobody@x.com", "userName": "Ghost" }))
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());

    use cuidartrite::schema::users;
    let mut conn = app.db_connection();
    let count = users::table.count().get_result::<i64>(&mut conn).unwrap();
    assert_eq!(1, count);
    let name = users::table
        .select(users::name)
        .filter(users::email.eq("a@x.com"))
        .first::<Option<String>>(&mut conn)
        .unwrap();
    assert_eq!(name.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn update_user_accepts_numbers_for_text_fields_and_flags() {
    // arrange
    let app = spawn_app().await;
    app.register_user("a@x.com").await;

    // act
    let response = app
        .post_update_user(&json!({
            "email": "a@x.com",
            "userName": "Ana",
            "userBirthYear": 1960,
            "userContact": 5550100,
            "notifWater": 1,
            "notifMeds": 0,
            "notifPractice": true,
        }))
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let profile = app.login_body("a@x.com").await;
    assert_eq!(profile["birthYear"], "1960");
    assert_eq!(profile["contact"], "5550100");
    assert_eq!(profile["notifWater"], true);
    assert_eq!(profile["notifMeds"], false);
    assert_eq!(profile["notifPractice"], true);
}
