mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

fn register_body() -> Value {
    json!({
        "name": "matheus",
        "cpf": "11430143916",
        "rg": "272582268",
        "email": "matheus@gmail.com",
        "phone": "movel",
        "number": "999555595",
        "username": "matheus",
        "password": "123456",
        "profile": "admin"
    })
}

async fn register(body: Value) -> Result<(StatusCode, Value)> {
    common::send(common::app(), "POST", "/user", None, Some(body)).await
}

#[tokio::test]
async fn registration_rejects_missing_required_fields() -> Result<()> {
    for field in ["name", "email", "cpf", "rg", "username", "password"] {
        let mut body = register_body();
        body[field] = json!("");

        let (status, response) = register(body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "empty {field}");
        assert_eq!(response["code"], "VALIDATION_ERROR");
    }

    Ok(())
}

#[tokio::test]
async fn registration_rejects_invalid_formats() -> Result<()> {
    let cases = [
        ("email", "matheus-at-gmail"),
        ("cpf", "114301439"),
        ("cpf", "1143014391a"),
        ("rg", "27a582268"),
    ];

    for (field, value) in cases {
        let mut body = register_body();
        body[field] = json!(value);

        let (status, response) = register(body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "invalid {field}={value}");
        assert_eq!(response["code"], "VALIDATION_ERROR");
        assert!(
            response["field_errors"][field].is_string(),
            "expected error on {field}: {response}"
        );
    }

    Ok(())
}

#[tokio::test]
async fn login_requires_username_and_password() -> Result<()> {
    let (status, response) = common::send(
        common::app(),
        "POST",
        "/login",
        None,
        Some(json!({ "password": "123456" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["field_errors"]["username"].is_string());

    let (status, response) = common::send(
        common::app(),
        "POST",
        "/login",
        None,
        Some(json!({ "username": "matheus" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["field_errors"]["password"].is_string());

    Ok(())
}
