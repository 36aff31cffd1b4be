//! API Routes
//!
//! Configures the Axum router with all cache inspector endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    find_channel_handler, find_user_handler, get_channel_handler, get_message_handler,
    get_names_handler, get_user_handler, get_user_state_handler, health_handler,
    list_channels_handler, list_messages_handler, list_user_states_handler, list_users_handler,
    stats_handler, AppState,
};

/// Creates the inspector router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (read-only endpoints)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/users", get(list_users_handler))
        .route("/users/:id", get(get_user_handler))
        .route("/find/user/:name", get(find_user_handler))
        .route("/channels", get(list_channels_handler))
        .route("/channels/:id", get(get_channel_handler))
        .route("/find/channel/:name", get(find_channel_handler))
        .route("/messages", get(list_messages_handler))
        .route("/messages/:id", get(get_message_handler))
        .route("/user-states", get(list_user_states_handler))
        .route("/user-states/:channel", get(get_user_state_handler))
        .route("/names/:channel", get(get_names_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entities::ChatChannel;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, AppState) {
        let state = AppState::from_config(&Config::default());
        (create_router(state.clone()), state)
    }

    async fn status_of(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _) = create_test_app();
        assert_eq!(status_of(app, "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let (app, _) = create_test_app();
        assert_eq!(status_of(app, "/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_channel_by_id_and_name() {
        let (app, state) = create_test_app();
        state.cache.add_channel(ChatChannel::new(5, "somechan"));

        assert_eq!(status_of(app.clone(), "/channels/5").await, StatusCode::OK);
        assert_eq!(status_of(app.clone(), "/find/channel/somechan").await, StatusCode::OK);
        assert_eq!(status_of(app, "/channels/6").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_rejected() {
        let (app, _) = create_test_app();
        assert_eq!(status_of(app, "/users/abc").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_names_not_found() {
        let (app, _) = create_test_app();
        assert_eq!(status_of(app, "/names/nobody").await, StatusCode::NOT_FOUND);
    }
}
