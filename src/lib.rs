//! Breezy HR job postings integration
//!
//! Signs in to the Breezy HR API, fetches the company's published positions
//! and single position records, caches the token and the data, and shapes
//! the results for the host's page templates and router.
//!
//! ```no_run
//! use std::sync::Arc;
//! use breezy::{BreezyApiManager, BreezySettings, PathRouter, PositionController};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = BreezySettings::from_file("breezy.toml")?;
//! let manager = Arc::new(BreezyApiManager::from_settings(settings));
//! let controller = PositionController::new(manager, Arc::new(PathRouter::new("/careers")));
//! let listing = controller.positions_list().await;
//! # let _ = listing;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod data;
pub mod presentation;

pub use api::{BreezyApiManager, BreezyError, HttpClient, HttpResponse, RemoteApi, TransportError};
pub use cache::{CacheStore, CachedData, MemoryCache};
pub use config::{BreezySettings, ConfigError};
pub use data::{AccessToken, Position, PositionDetail, PositionId, PositionLink, PositionState};
pub use presentation::{
    ApplicationLink, PageOutcome, PathRouter, PositionController, PositionPage, PositionRouter,
    RoutedLink,
};
