//! Integration Tests for the Inspector API
//!
//! Tests full request/response cycles against a populated cache.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use twitch_kit::{
    api::create_router,
    entities::{ChatChannel, ChatMessage, ChatUser, UserState},
    AppState, CacheManager, CacheSeed, CacheSize, Config,
};

// == Helper Functions ==

fn create_test_app(message_cache_size: usize) -> (Router, Arc<CacheManager>) {
    let config = Config {
        message_cache_size: CacheSize::Bounded(message_cache_size),
        ..Config::default()
    };
    let state = AppState::from_config(&config);
    let cache = Arc::clone(&state.cache);
    (create_router(state), cache)
}

fn message(id: &str, content: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        channel_id: 1,
        channel_name: "somechan".to_string(),
        author_id: 10,
        author_name: "alice".to_string(),
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

// == Health / Stats ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app(10);

    let (status, json) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_stats_reflect_evictions() {
    let (app, cache) = create_test_app(2);
    for i in 0..5 {
        cache.add_message(message(&format!("m{i}"), "hi"));
    }

    let (status, json) = get(app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["messages"]["total_entries"], 2);
    assert_eq!(json["messages"]["evictions"], 3);
    assert_eq!(json["users"]["total_entries"], 0);
    assert_eq!(json["messages"]["capacity"], 2);
    assert_eq!(json["messages"]["insertions"], 5);
    assert!(json["users"]["capacity"].is_null());
}

#[tokio::test]
async fn test_seeded_cache_is_served() {
    let (app, cache) = create_test_app(10);
    let seed = CacheSeed::from_json(
        r#"{
            "users": [{"id": 7, "name": "carol"}],
            "messages": [{"id": "m1", "channel_id": 1, "channel_name": "somechan",
                          "user_id": 8, "user_name": "dave", "content": "hello",
                          "timestamp": "2024-03-01T12:00:00Z"}]
        }"#,
    )
    .unwrap();
    seed.apply(&cache);

    let (status, json) = get(app.clone(), "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);

    let (status, json) = get(app, "/messages/m1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["author_name"], "dave");
}

// == Users ==

#[tokio::test]
async fn test_user_lookup_by_id() {
    let (app, cache) = create_test_app(10);
    cache.add_user(ChatUser::new(42, "alice"));

    let (status, json) = get(app.clone(), "/users/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "alice");

    let (status, json) = get(app, "/users/43").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("user 43"));
}

#[tokio::test]
async fn test_user_lookup_by_name_policies() {
    let (app, cache) = create_test_app(10);
    cache.add_user(ChatUser::new(1, "alice"));
    cache.add_user(ChatUser::new(2, "bob"));
    cache.add_user(ChatUser::new(3, "bob"));

    let (status, json) = get(app.clone(), "/find/user/alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], 1);

    let (status, _) = get(app.clone(), "/find/user/carol").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = get(app, "/find/user/bob").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("Ambiguous"));
}

#[tokio::test]
async fn test_users_listing_in_insertion_order() {
    let (app, cache) = create_test_app(10);
    for (id, name) in [(3, "c"), (1, "a"), (2, "b")] {
        cache.add_user(ChatUser::new(id, name));
    }

    let (status, json) = get(app.clone(), "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    let names: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["c", "a", "b"]);

    let (status, json) = get(app, "/users?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"][0]["name"], "b");
}

#[tokio::test]
async fn test_listing_rejects_zero_limit() {
    let (app, _) = create_test_app(10);

    let (status, _) = get(app, "/messages?limit=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Channels / Names / User States ==

#[tokio::test]
async fn test_channel_and_names() {
    let (app, cache) = create_test_app(10);
    cache.add_channel(ChatChannel::new(7, "somechan"));
    cache.add_names("somechan", ["alice", "bob"]);
    cache.add_names("somechan", ["carol"]);

    let (status, json) = get(app.clone(), "/find/channel/somechan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], 7);

    let (status, json) = get(app, "/names/somechan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    assert_eq!(json["names"][2], "carol");
}

#[tokio::test]
async fn test_user_state_endpoint() {
    let (app, cache) = create_test_app(10);
    cache.add_user_state(UserState {
        channel_name: "somechan".to_string(),
        display_name: Some("Bot".to_string()),
        color: None,
        badges: vec!["moderator/1".to_string()],
        is_moderator: true,
        is_subscriber: false,
    });

    let (status, json) = get(app.clone(), "/user-states/somechan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_moderator"], true);

    let (status, _) = get(app, "/user-states/otherchan").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Messages ==

#[tokio::test]
async fn test_evicted_message_not_found() {
    let (app, cache) = create_test_app(1);
    cache.add_message(message("first", "one"));
    cache.add_message(message("second", "two"));

    let (status, _) = get(app.clone(), "/messages/first").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = get(app, "/messages/second").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], "two");
}
