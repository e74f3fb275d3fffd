use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::api;
use crate::common::testing::Harness;

fn app(harness: &Harness) -> Router {
    api().with_state(harness.state.clone())
}

async fn call(
    harness: &Harness,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app(harness).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn sign_up(harness: &Harness, username: &str) -> String {
    let (status, body) = call(
        harness,
        Method::POST,
        "/auth/signup",
        Some(json!({ "username": username })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn sign_up_returns_account_and_rejects_taken_name() {
    let harness = Harness::new();

    let (status, body) = call(
        &harness,
        Method::POST,
        "/auth/signup",
        Some(json!({ "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["follower_count"], 0);

    let (status, body) = call(
        &harness,
        Method::POST,
        "/auth/signup",
        Some(json!({ "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn follow_then_post_shows_up_in_follower_feed() {
    let harness = Harness::new();
    let alice = sign_up(&harness, "alice").await;
    let bob = sign_up(&harness, "bob").await;

    let (status, body) = call(
        &harness,
        Method::POST,
        &format!("/users/{}/follow", alice),
        Some(json!({ "currentUserId": bob })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "followed");

    let (status, body) = call(
        &harness,
        Method::POST,
        &format!("/users/{}/follow", alice),
        Some(json!({ "currentUserId": bob })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "already-following");

    harness.clock.set(1000);
    let (status, post) = call(
        &harness,
        Method::POST,
        "/posts",
        Some(json!({ "userId": alice, "content": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["timestamp"], 1000);

    let (status, feed) = call(&harness, Method::GET, &format!("/feed?userId={}", bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed["posts"][0]["id"], post["id"]);
    assert_eq!(feed["posts"][0]["author"]["username"], "alice");
    assert_eq!(feed["nextCursor"], Value::Null);
}

#[tokio::test]
async fn feed_pages_follow_next_cursor() {
    let harness = Harness::new();
    let alice = sign_up(&harness, "alice").await;

    for n in 1..=3 {
        harness.clock.set(n * 1000);
        let (status, _) = call(
            &harness,
            Method::POST,
            "/posts",
            Some(json!({ "userId": alice, "content": format!("post {}", n) })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, first) = call(
        &harness,
        Method::GET,
        &format!("/feed?userId={}&limit=2", alice),
        None,
    )
    .await;
    assert_eq!(first["posts"].as_array().unwrap().len(), 2);
    assert_eq!(first["posts"][0]["content"], "post 3");
    assert_eq!(first["nextCursor"], 1999);

    let (_, second) = call(
        &harness,
        Method::GET,
        &format!("/feed?userId={}&limit=2&cursor=1999", alice),
        None,
    )
    .await;
    assert_eq!(second["posts"].as_array().unwrap().len(), 1);
    assert_eq!(second["posts"][0]["content"], "post 1");
    assert_eq!(second["nextCursor"], Value::Null);
}

#[tokio::test]
async fn like_is_idempotent_over_http() {
    let harness = Harness::new();
    let alice = sign_up(&harness, "alice").await;
    let (_, post) = call(
        &harness,
        Method::POST,
        "/posts",
        Some(json!({ "userId": alice, "content": "hello" })),
    )
    .await;
    let uri = format!("/posts/{}/like", post["id"].as_str().unwrap());

    let (_, body) = call(&harness, Method::POST, &uri, Some(json!({ "userId": alice }))).await;
    assert_eq!(body["message"], "Post liked");
    let (_, body) = call(&harness, Method::POST, &uri, Some(json!({ "userId": alice }))).await;
    assert_eq!(body["message"], "Post already liked");

    let (status, details) = call(
        &harness,
        Method::GET,
        &format!("/posts/{}", post["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["like_count"], 1);
    assert_eq!(details["comments"], json!([]));
}

#[tokio::test]
async fn errors_map_to_status_codes() {
    let harness = Harness::new();
    let alice = sign_up(&harness, "alice").await;

    let (status, _) = call(
        &harness,
        Method::POST,
        &format!("/users/{}/follow", alice),
        Some(json!({ "currentUserId": alice })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&harness, Method::GET, "/posts/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_description"], "post not found");

    let (status, body) = call(
        &harness,
        Method::POST,
        &format!("/posts/{}/like", "x".repeat(40)),
        Some(json!({ "userId": alice })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_description"], "post not found");

    let (status, _) = call(
        &harness,
        Method::POST,
        "/posts",
        Some(json!({ "userId": alice, "content": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    harness.cache.set_unavailable(true);
    let (status, body) = call(
        &harness,
        Method::POST,
        "/posts",
        Some(json!({ "userId": alice, "content": "kept anyway" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Feed delivery failed");
}
