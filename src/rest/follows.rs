//! Follows listing request.

use super::{Method, RestRequest};

/// Sort key for follow listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    CreatedAt,
    LastBroadcast,
    Login,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::CreatedAt => "created_at",
            SortMode::LastBroadcast => "last_broadcast",
            SortMode::Login => "login",
        }
    }
}

/// `GET users/{id}/follows/channels`: the channels a user follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetFollowsRequest(RestRequest);

impl GetFollowsRequest {
    pub fn new(user_id: u64, sort: SortMode, ascending: bool, limit: u32, offset: u32) -> Self {
        let request = RestRequest::new(Method::Get, format!("users/{user_id}/follows/channels"))
            .param("limit", limit)
            .param("offset", offset)
            .param("direction", if ascending { "asc" } else { "desc" })
            .param("sortby", sort.as_str());
        Self(request)
    }

    pub fn url(&self) -> String {
        self.0.url()
    }

    pub fn into_request(self) -> RestRequest {
        self.0
    }
}

impl AsRef<RestRequest> for GetFollowsRequest {
    fn as_ref(&self) -> &RestRequest {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_url() {
        let request = GetFollowsRequest::new(44322889, SortMode::CreatedAt, false, 25, 50);

        assert_eq!(
            request.url(),
            "users/44322889/follows/channels?limit=25&offset=50&direction=desc&sortby=created_at"
        );
        assert_eq!(request.as_ref().method, Method::Get);
    }

    #[test]
    fn test_follows_ascending_by_login() {
        let request = GetFollowsRequest::new(1, SortMode::Login, true, 10, 0).into_request();

        assert!(request.query.contains(&("direction".to_string(), "asc".to_string())));
        assert!(request.query.contains(&("sortby".to_string(), "login".to_string())));
    }
}
