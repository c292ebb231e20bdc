use crate::helpers::spawn_app;
use claim::assert_some;
use serde_json::json;

#[tokio::test]
async fn get_all_data_is_empty_without_users() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/admin/get_all_data").await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_all_data_attaches_each_users_histories() {
    // arrange
    let app = spawn_app().await;
    app.register_user("a@x.com").await;
    app.register_user("b@x.com").await;
    app.post_add_pain(&json!({ "email": "a@x.com", "date": "01/01", "level": 5 }))
        .await;
    app.post_add_practice(&json!({ "email": "b@x.com", "name": "Yoga" }))
        .await;

    // act
    let response = app.get("/admin/get_all_data").await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    let users = body.as_array().unwrap();
    assert_eq!(2, users.len());

    let ana = users.iter().find(|u| u["email"] == "a@x.com");
    assert_some!(ana);
    let ana = ana.unwrap();
    assert_eq!(ana["userName"], "Ana");
    assert_eq!(ana["painHistory"].as_array().unwrap().len(), 1);
    assert_eq!(ana["practicesHistory"], json!([]));

    let other = users.iter().find(|u| u["email"] == "b@x.com").unwrap();
    assert_eq!(other["painHistory"], json!([]));
    assert_eq!(
        other["practicesHistory"],
        json!([{ "name": "Yoga", "date": null, "duration": null }])
    );
}
