mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn insert_then_read_one() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("u1").await?;

    let created = server.insert_user(&token, "John", 30).await?;
    let id = created["id"].as_i64().expect("assigned id");

    let res = server
        .client
        .get(server.url(&format!("/api/user/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body, created);
    assert_eq!(body["name"], "John");
    assert_eq!(body["lastname"], "Doe");
    assert_eq!(body["age"], 30);
    assert_eq!(body["email"], "john@example.com");
    Ok(())
}

#[tokio::test]
async fn list_returns_every_record() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("u1").await?;

    server.insert_user(&token, "John", 30).await?;
    server.insert_user(&token, "Jane", 28).await?;

    let res = server.client.get(server.url("/")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Vec<Value>>().await?;
    let names: Vec<&str> = body.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["John", "Jane"]);
    Ok(())
}

#[tokio::test]
async fn missing_record_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("u1").await?;

    let res = server
        .client
        .get(server.url("/api/user/999"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn update_replaces_all_fields() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("u1").await?;

    let created = server.insert_user(&token, "John", 30).await?;
    let id = created["id"].as_i64().unwrap();

    let replacement = json!({
        "name": "Johnny",
        "lastname": "Smith",
        "age": 31,
        "email": "johnny@example.com",
    });
    let res = server
        .client
        .put(server.url(&format!("/api/update/{}", id)))
        .bearer_auth(&token)
        .json(&replacement)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let body = server
        .client
        .get(server.url(&format!("/api/user/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Johnny");
    assert_eq!(body["lastname"], "Smith");
    assert_eq!(body["age"], 31);
    assert_eq!(body["email"], "johnny@example.com");
    Ok(())
}

#[tokio::test]
async fn update_without_every_field_is_refused_and_changes_nothing() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("u1").await?;

    let created = server.insert_user(&token, "John", 30).await?;
    let id = created["id"].as_i64().unwrap();

    // Replace-all semantics: a partial body never reaches the store.
    let res = server
        .client
        .put(server.url(&format!("/api/update/{}", id)))
        .bearer_auth(&token)
        .json(&json!({ "name": "OnlyName" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = server
        .client
        .get(server.url(&format!("/api/user/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body, created);
    Ok(())
}

#[tokio::test]
async fn update_and_delete_of_missing_record_are_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("u1").await?;

    let res = server
        .client
        .put(server.url("/api/update/424242"))
        .bearer_auth(&token)
        .json(&json!({ "name": "A", "lastname": "B", "age": 1, "email": "a@b.c" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .client
        .delete(server.url("/api/delete/424242"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_then_read_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("u1").await?;

    let created = server.insert_user(&token, "John", 30).await?;
    let id = created["id"].as_i64().unwrap();

    let res = server
        .client
        .delete(server.url(&format!("/api/delete/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = server
        .client
        .get(server.url(&format!("/api/user/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .client
        .delete(server.url(&format!("/api/delete/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn non_integer_id_is_a_client_error() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("u1").await?;

    let res = server
        .client
        .get(server.url("/api/user/abc"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn insert_with_wrong_age_type_is_refused() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token_for("u1").await?;

    let res = server
        .client
        .post(server.url("/api/insert"))
        .bearer_auth(&token)
        .json(&json!({ "name": "A", "lastname": "B", "age": "thirty", "email": "a@b.c" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}
