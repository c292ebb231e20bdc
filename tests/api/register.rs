use crate::helpers::spawn_app;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use serde_json::json;

#[tokio::test]
async fn register_returns_a_201_and_stores_the_user() {
    // arrange
    let app = spawn_app().await;
    let email: String = SafeEmail().fake();

    // act
    let response = app
        .post_register(&json!({ "email": email, "password": "p", "name": "Ana" }))
        .await;

    // assert
    assert_eq!(201, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Criado", "status": "ok" }));

    use cuidartrite::schema::users;
    let (saved_password, saved_name) = users::table
        .select((users::password, users::name))
        .filter(users::email.eq(&email))
        .first::<(Option<String>, Option<String>)>(&mut app.db_connection())
        .expect("Result set was empty.");
    assert_eq!(saved_password.as_deref(), Some("p"));
    assert_eq!(saved_name.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn register_returns_a_400_for_duplicate_email() {
    // arrange
    let app = spawn_app().await;
    let body = json!({ "email": "a@x.com", "password": "p", "name": "Ana" });

    // act
    let first = app.post_register(&body).await;
    let second = app.post_register(&body).await;

    // assert
    assert_eq!(201, first.status().as_u16());
    assert_eq!(400, second.status().as_u16());
    let error: serde_json::Value = second.json().await.unwrap();
    assert_eq!(error["status"], "error");
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("UNIQUE constraint failed"));

    use cuidartrite::schema::users;
    let count = users::table
        .count()
        .get_result::<i64>(&mut app.db_connection())
        .unwrap();
    assert_eq!(1, count);
}

#[tokio::test]
async fn register_returns_a_400_when_the_body_is_unusable() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (json!("just a string"), "not an object"),
        (json!({ "email": 42 }), "email of the wrong type"),
    ];

    for (invalid_body, description) in test_cases {
        // act
        let response = app.post_register(&invalid_body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        let error: serde_json::Value = response.json().await.unwrap();
        assert_eq!(error["status"], "error");
    }
}

#[tokio::test]
async fn register_accepts_missing_name_and_password() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.post_register(&json!({ "email": "a@x.com" })).await;

    // assert
    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn register_without_an_email_stores_a_row_with_a_null_email() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app
        .post_register(&json!({ "password": "p", "name": "Ana" }))
        .await;

    // assert
    assert_eq!(201, response.status().as_u16());

    use cuidartrite::schema::users;
    let count = users::table
        .filter(users::email.is_null())
        .count()
        .get_result::<i64>(&mut app.db_connection())
        .unwrap();
    assert_eq!(1, count);
}
