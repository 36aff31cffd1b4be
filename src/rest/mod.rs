//! REST Module
//!
//! Request builders for the Twitch REST API. Each request knows its method,
//! endpoint template and query parameters; sending it is the transport's job.

mod follows;
mod request;

pub use follows::{GetFollowsRequest, SortMode};
pub use request::{Method, RestRequest};
