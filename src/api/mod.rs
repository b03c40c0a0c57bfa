//! Breezy HR API access
//!
//! `client` is the raw transport, `manager` layers token and data caching on
//! top of it, and `error` holds the failure taxonomy callers match on.

pub mod client;
pub mod error;
pub mod manager;

pub use client::{HttpClient, HttpResponse, RemoteApi, TransportError};
pub use error::BreezyError;
pub use manager::{position_cache_key, BreezyApiManager, ACCESS_TOKEN_KEY, POSITIONS_KEY};
