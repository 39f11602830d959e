mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_login_and_load_current_user() {
    let app = TestApp::spawn().await;

    let token = app.register("Alice", "alice@example.com", "secret1").await;
    assert!(!token.is_empty());

    let response = app
        .post("/api/auth")
        .json(&json!({ "email": "alice@example.com", "password": "secret1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());

    let response = app
        .get_authenticated("/api/auth", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body["_id"].is_string());
    assert!(body["date"].is_string());
    assert!(body["avatar"]
        .as_str()
        .unwrap()
        .starts_with("https://www.gravatar.com/avatar/"));
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "name": "", "email": "not-an-email", "password": "123" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({
            "errors": [
                { "msg": "Name is required", "param": "name" },
                { "msg": "Please Enter a valid email", "param": "email" },
                { "msg": "Please enter password with 6 or more characters", "param": "password" }
            ]
        })
    );
    assert_eq!(app.users.count().await, 0);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "secret1").await;

    let response = app
        .post("/api/users")
        .json(&json!({ "name": "Mallory", "email": " ALICE@example.com", "password": "other-pass" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "errors": [{ "msg": "User Already Exist" }] }));
    assert_eq!(app.users.count().await, 1);

    // The original credentials still work.
    let response = app
        .post("/api/auth")
        .json(&json!({ "email": "alice@example.com", "password": "secret1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "secret1").await;

    for body in [
        json!({ "email": "alice@example.com", "password": "wrong-pass" }),
        json!({ "email": "nobody@example.com", "password": "secret1" }),
    ] {
        let response = app
            .post("/api/auth")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "errors": [{ "msg": "Invalid Credentials" }] }));
    }
}

#[tokio::test]
async fn test_login_validation_errors() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth")
        .json(&json!({ "email": "nope" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["msg"], "Please include a valid email");
    assert_eq!(body["errors"][1]["msg"], "Password is required");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn().await;

    for request in [app.get("/api/auth"), app.get("/api/posts")] {
        let response = request.send().await.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "msg": "No token, authorization denied" }));
    }

    let response = app
        .get_authenticated("/api/auth", "")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_corrupted_token() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    let mut corrupted = token.clone();
    corrupted.push('x');

    for token in [corrupted.as_str(), "garbage", "a.b.c"] {
        let response = app
            .get_authenticated("/api/auth", token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "msg": "Token is not valid" }));
    }
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "secret1").await;

    let user_id = uuid::Uuid::new_v4().to_string();
    let expired = app
        .token_issuer
        .issue_at(&user_id, Utc::now() - Duration::hours(11))
        .unwrap();

    let response = app
        .get_authenticated("/api/auth", &expired)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Token is not valid");
}

#[tokio::test]
async fn test_token_for_unknown_user() {
    let app = TestApp::spawn().await;
    let token = app
        .token_issuer
        .issue(&uuid::Uuid::new_v4().to_string())
        .unwrap();

    let response = app
        .get_authenticated("/api/auth", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "msg": "User not found" }));
}

#[tokio::test]
async fn test_create_and_list_posts() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    let first = app.create_post(&token, "first").await;
    assert_eq!(first["text"], "first");
    assert_eq!(first["name"], "Alice");
    assert_eq!(first["likes"], json!([]));
    assert_eq!(first["comments"], json!([]));

    app.create_post(&token, "second").await;

    let response = app
        .get_authenticated("/api/posts", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let posts: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["text"], "second");

    let response = app
        .get_authenticated(&format!("/api/posts/{}", first["_id"].as_str().unwrap()), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_post_requires_text() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    let response = app
        .post_authenticated("/api/posts", &token)
        .json(&json!({ "text": "" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "errors": [{ "msg": "Text is required", "param": "text" }] })
    );
}

#[tokio::test]
async fn test_get_missing_or_malformed_post() {
    let app = TestApp::spawn().await;
    let token = app.register("Alice", "alice@example.com", "secret1").await;

    for id in [uuid::Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let response = app
            .get_authenticated(&format!("/api/posts/{}", id), &token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "msg": "Post not found" }));
    }
}

#[tokio::test]
async fn test_like_and_unlike() {
    let app = TestApp::spawn().await;
    let alice = app.register("Alice", "alice@example.com", "secret1").await;
    let bob = app.register("Bob", "bob@example.com", "secret2").await;
    let post = app.create_post(&alice, "hello").await;
    let id = post["_id"].as_str().unwrap();

    let response = app
        .put_authenticated(&format!("/api/posts/like/{}", id), &bob)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let likes: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(likes.len(), 1);

    let response = app
        .put_authenticated(&format!("/api/posts/like/{}", id), &bob)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "msg": "Post already liked" }));

    let response = app
        .put_authenticated(&format!("/api/posts/dislike/{}", id), &alice)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "msg": "Post has not yet been liked" }));

    let response = app
        .put_authenticated(&format!("/api/posts/dislike/{}", id), &bob)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let likes: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert!(likes.is_empty());
}

#[tokio::test]
async fn test_delete_post_authorization() {
    let app = TestApp::spawn().await;
    let alice = app.register("Alice", "alice@example.com", "secret1").await;
    let bob = app.register("Bob", "bob@example.com", "secret2").await;
    let post = app.create_post(&alice, "hello").await;
    let path = format!("/api/posts/{}", post["_id"].as_str().unwrap());

    let response = app
        .delete_authenticated(&path, &bob)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "msg": "User not authorized" }));

    let response = app
        .delete_authenticated(&path, &alice)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "msg": "Post removed" }));

    let response = app
        .get_authenticated(&path, &alice)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let app = TestApp::spawn().await;
    let alice = app.register("Alice", "alice@example.com", "secret1").await;
    let bob = app.register("Bob", "bob@example.com", "secret2").await;
    let post = app.create_post(&alice, "hello").await;
    let id = post["_id"].as_str().unwrap();

    let response = app
        .post_authenticated(&format!("/api/posts/comment/{}", id), &bob)
        .json(&json!({ "text": "nice post" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let comments: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["name"], "Bob");
    let comment_id = comments[0]["_id"].as_str().unwrap().to_string();
    let path = format!("/api/posts/comment/{}/{}", id, comment_id);

    let response = app
        .delete_authenticated(&path, &alice)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .delete_authenticated(&path, &bob)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let comments: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert!(comments.is_empty());

    let response = app
        .delete_authenticated(&path, &bob)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "msg": "Comment does not exist" }));
}
