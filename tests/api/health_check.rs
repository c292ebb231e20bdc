use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/health_check").await;

    // assert
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn home_returns_the_status_banner() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/").await;

    // assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        "Servidor CuidArtrite - Lógica de Dia Único Ativa!",
        response.text().await.unwrap()
    );
}

#[tokio::test]
async fn unknown_routes_answer_with_the_error_envelope() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/does_not_exist").await;

    // assert
    assert_eq!(404, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn dropping_the_test_app_removes_its_database_file() {
    // arrange
    let app = spawn_app().await;
    let path = app.db_path.clone();
    assert!(path.exists());

    // act
    drop(app);

    // assert
    assert!(!path.exists());
}
