//! API Handlers
//!
//! Read-only HTTP handlers over a shared entity cache.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::CacheManager;
use crate::config::Config;
use crate::entities::{ChatChannel, ChatMessage, ChatUser, UserState};
use crate::error::{CacheError, Result};
use crate::models::{HealthResponse, ListQuery, ListResponse, NamesResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Entity cache owned by the chat client
    pub cache: Arc<CacheManager>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState with a fresh cache built from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(CacheManager::new(config)))
    }
}

/// Clones a snapshot out of its `Arc`s for serialization.
fn owned<T: Clone>(items: Vec<Arc<T>>) -> Vec<T> {
    items.into_iter().map(|item| (*item).clone()).collect()
}

fn validated(query: &ListQuery) -> Result<()> {
    match query.validate() {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(&state.cache.stats()))
}

/// Handler for GET /users
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<ChatUser>>> {
    validated(&query)?;
    let users = query.apply(owned(state.cache.users()));
    Ok(Json(ListResponse::new(users)))
}

/// Handler for GET /users/:id
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ChatUser>> {
    state
        .cache
        .get_user(id)
        .map(|user| Json((*user).clone()))
        .ok_or_else(|| CacheError::NotFound(format!("user {}", id)))
}

/// Handler for GET /find/user/:name
pub async fn find_user_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ChatUser>> {
    state
        .cache
        .find_user_by_name(&name)?
        .map(|user| Json((*user).clone()))
        .ok_or_else(|| CacheError::NotFound(format!("user '{}'", name)))
}

/// Handler for GET /channels
pub async fn list_channels_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<ChatChannel>>> {
    validated(&query)?;
    let channels = query.apply(owned(state.cache.channels()));
    Ok(Json(ListResponse::new(channels)))
}

/// Handler for GET /channels/:id
pub async fn get_channel_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ChatChannel>> {
    state
        .cache
        .get_channel(id)
        .map(|channel| Json((*channel).clone()))
        .ok_or_else(|| CacheError::NotFound(format!("channel {}", id)))
}

/// Handler for GET /find/channel/:name
pub async fn find_channel_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ChatChannel>> {
    state
        .cache
        .find_channel_by_name(&name)?
        .map(|channel| Json((*channel).clone()))
        .ok_or_else(|| CacheError::NotFound(format!("channel '{}'", name)))
}

/// Handler for GET /messages
pub async fn list_messages_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<ChatMessage>>> {
    validated(&query)?;
    let messages = query.apply(owned(state.cache.messages()));
    Ok(Json(ListResponse::new(messages)))
}

/// Handler for GET /messages/:id
pub async fn get_message_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatMessage>> {
    state
        .cache
        .get_message(&id)
        .map(|message| Json((*message).clone()))
        .ok_or_else(|| CacheError::NotFound(format!("message {}", id)))
}

/// Handler for GET /user-states
pub async fn list_user_states_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<UserState>>> {
    validated(&query)?;
    let states = query.apply(owned(state.cache.user_states()));
    Ok(Json(ListResponse::new(states)))
}

/// Handler for GET /user-states/:channel
pub async fn get_user_state_handler(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Result<Json<UserState>> {
    state
        .cache
        .get_user_state(&channel)
        .map(|user_state| Json((*user_state).clone()))
        .ok_or_else(|| CacheError::NotFound(format!("user state for '{}'", channel)))
}

/// Handler for GET /names/:channel
pub async fn get_names_handler(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Result<Json<NamesResponse>> {
    let names = state
        .cache
        .get_names(&channel)
        .ok_or_else(|| CacheError::NotFound(format!("names for '{}'", channel)))?;
    Ok(Json(NamesResponse::new(channel, names)))
}
