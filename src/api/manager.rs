//! Breezy API manager
//!
//! Resolves the access token, the published positions list and single
//! position records, serving each from the cache while it is fresh and
//! falling through to the remote API otherwise.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::client::{HttpClient, HttpResponse, RemoteApi};
use super::error::BreezyError;
use crate::cache::{CacheStore, MemoryCache};
use crate::config::BreezySettings;
use crate::data::{AccessToken, Position, PositionDetail, PositionId, PositionLink};

/// Cache key of the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Cache key of the published positions list
pub const POSITIONS_KEY: &str = "positions";

/// Cache key of a single position record
pub fn position_cache_key(position_id: &PositionId) -> String {
    format!("position_{}", position_id)
}

/// Body of a successful sign-in response
#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Cached access to the Breezy HR API
///
/// Holds no token of its own: every data fetch resolves the token through
/// the cache, so the one used is always the most recently resolved value.
/// Failures are logged here and returned as `BreezyError`.
pub struct BreezyApiManager {
    settings: BreezySettings,
    api: Arc<dyn RemoteApi>,
    cache: Arc<dyn CacheStore>,
    /// Positions whose detail was fetched through this manager
    fetched_details: Mutex<HashSet<PositionId>>,
}

impl BreezyApiManager {
    /// Creates a manager without touching the network
    pub fn new(
        settings: BreezySettings,
        api: Arc<dyn RemoteApi>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            settings,
            api,
            cache,
            fetched_details: Mutex::new(HashSet::new()),
        }
    }

    /// Creates a manager using reqwest and an in-process cache
    pub fn from_settings(settings: BreezySettings) -> Self {
        Self::new(
            settings,
            Arc::new(HttpClient::new()),
            Arc::new(MemoryCache::new()),
        )
    }

    /// Creates a manager and resolves the access token once
    ///
    /// A failed sign-in is logged and does not prevent construction; data
    /// calls made afterwards retry the sign-in and report `AuthFailure`.
    pub async fn connect(
        settings: BreezySettings,
        api: Arc<dyn RemoteApi>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        let manager = Self::new(settings, api, cache);
        if let Err(err) = manager.access_token(false).await {
            warn!(error = %err, "Starting without a Breezy access token");
        }
        manager
    }

    /// Settings this manager was built with
    pub fn settings(&self) -> &BreezySettings {
        &self.settings
    }

    /// Returns the access token, signing in when the cached one is absent,
    /// expired, or `force_refresh` is set
    pub async fn resolve_access_token(
        &self,
        force_refresh: bool,
    ) -> Result<AccessToken, BreezyError> {
        self.access_token(force_refresh).await.inspect_err(|err| {
            error!(
                operation = "resolve_access_token",
                error = %err,
                "Unable to retrieve Breezy access token"
            )
        })
    }

    /// Returns the company's published positions
    pub async fn list_positions(&self, force_refresh: bool) -> Result<Vec<Position>, BreezyError> {
        self.cached_fetch(
            POSITIONS_KEY,
            self.settings.data_ttl_secs,
            force_refresh,
            || self.fetch_positions(),
        )
        .await
        .inspect_err(|err| {
            error!(operation = "list_positions", error = %err, "Error accessing Breezy API")
        })
    }

    /// Returns the full record of one position
    ///
    /// A position the remote side does not know yields `BreezyError::NotFound`.
    pub async fn get_position_detail(
        &self,
        position_id: &PositionId,
        force_refresh: bool,
    ) -> Result<PositionDetail, BreezyError> {
        if position_id.as_str().trim().is_empty() {
            return Err(BreezyError::NotFound(position_id.clone()));
        }

        let key = position_cache_key(position_id);
        let result = self
            .cached_fetch(&key, self.settings.data_ttl_secs, force_refresh, || {
                self.fetch_position_detail(position_id)
            })
            .await;

        match &result {
            Ok(_) => {
                self.fetched_details.lock().insert(position_id.clone());
            }
            Err(BreezyError::NotFound(_)) => {
                debug!(position_id = %position_id, "Breezy position does not exist");
            }
            Err(err) => {
                error!(
                    operation = "get_position_detail",
                    position_id = %position_id,
                    error = %err,
                    "Error accessing Breezy API"
                );
            }
        }
        result
    }

    /// Display names and route targets for every published position
    pub async fn list_position_links(&self) -> Result<Vec<PositionLink>, BreezyError> {
        let positions = self.list_positions(false).await?;
        Ok(positions.iter().map(PositionLink::from).collect())
    }

    /// Drops the token, the positions list and every detail fetched so far
    pub fn invalidate_all(&self) {
        self.cache.invalidate(ACCESS_TOKEN_KEY);
        self.cache.invalidate(POSITIONS_KEY);
        for position_id in self.fetched_details.lock().drain() {
            self.cache.invalidate(&position_cache_key(&position_id));
        }
    }

    /// Token resolution without logging; failures are reported by the
    /// public operation that needed the token
    async fn access_token(&self, force_refresh: bool) -> Result<AccessToken, BreezyError> {
        self.cached_fetch(
            ACCESS_TOKEN_KEY,
            self.settings.token_ttl_secs,
            force_refresh,
            || self.sign_in(),
        )
        .await
    }

    /// Serves `key` from cache while fresh, otherwise runs `fetch` and stores
    /// the result for `ttl_secs`. Failed fetches leave the cache untouched.
    async fn cached_fetch<T, F, Fut>(
        &self,
        key: &str,
        ttl_secs: u64,
        force_refresh: bool,
        fetch: F,
    ) -> Result<T, BreezyError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, BreezyError>>,
    {
        if !force_refresh {
            if let Some(cached) = self.cache.get(key) {
                if !cached.is_expired {
                    match serde_json::from_value::<T>(cached.data) {
                        Ok(data) => {
                            debug!(key, "Breezy cache hit");
                            return Ok(data);
                        }
                        Err(err) => {
                            warn!(key, error = %err, "Discarding unreadable cache entry");
                        }
                    }
                }
            }
        }

        debug!(key, force_refresh, "Fetching from Breezy API");
        let data = fetch().await?;

        match serde_json::to_value(&data) {
            Ok(value) => self.cache.set(key, value, expires_after(ttl_secs)),
            Err(err) => warn!(key, error = %err, "Unable to cache Breezy response"),
        }
        Ok(data)
    }

    async fn sign_in(&self) -> Result<AccessToken, BreezyError> {
        let url = self
            .endpoint_url(&["signin"])
            .map_err(|err| BreezyError::AuthFailure(err.to_string()))?;
        let response = self
            .api
            .authenticate(url.as_str(), &self.settings.email, &self.settings.password)
            .await
            .map_err(|err| BreezyError::AuthFailure(err.to_string()))?;

        if !response.is_success() {
            return Err(BreezyError::AuthFailure(format!(
                "sign-in returned HTTP {}",
                response.status
            )));
        }

        let payload: SignInResponse = serde_json::from_str(&response.body).map_err(|err| {
            BreezyError::AuthFailure(format!("malformed sign-in response: {}", err))
        })?;

        payload
            .access_token
            .map(AccessToken::new)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                BreezyError::AuthFailure("sign-in response has no access_token".to_string())
            })
    }

    async fn fetch_positions(&self) -> Result<Vec<Position>, BreezyError> {
        let token = self.access_token(false).await?;
        let mut url =
            self.endpoint_url(&["company", self.settings.company_id.as_str(), "positions"])?;
        url.set_query(Some("state=published"));

        let response = self.authorized_get(url.as_str(), &token).await?;
        if !response.is_success() {
            return Err(BreezyError::TransportFailure(format!(
                "positions request returned HTTP {}",
                response.status
            )));
        }
        parse_body(&response.body)
    }

    async fn fetch_position_detail(
        &self,
        position_id: &PositionId,
    ) -> Result<PositionDetail, BreezyError> {
        let token = self.access_token(false).await?;
        let url = self.endpoint_url(&[
            "company",
            self.settings.company_id.as_str(),
            "position",
            position_id.as_str(),
        ])?;

        let response = self.authorized_get(url.as_str(), &token).await?;
        if response.is_not_found() {
            return Err(BreezyError::NotFound(position_id.clone()));
        }
        if !response.is_success() {
            return Err(BreezyError::TransportFailure(format!(
                "position request returned HTTP {}",
                response.status
            )));
        }

        let body = response.body.trim();
        if body.is_empty() || body == "null" {
            return Err(BreezyError::NotFound(position_id.clone()));
        }
        parse_body(body)
    }

    /// Base URL extended with percent-encoded path segments
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, BreezyError> {
        let mut url = Url::parse(self.settings.api_base()).map_err(|err| {
            BreezyError::TransportFailure(format!("invalid base URL: {}", err))
        })?;
        url.path_segments_mut()
            .map_err(|_| BreezyError::TransportFailure("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn authorized_get(
        &self,
        url: &str,
        token: &AccessToken,
    ) -> Result<HttpResponse, BreezyError> {
        let headers = [
            ("Accept", "application/json"),
            ("Authorization", token.as_str()),
        ];
        self.api
            .get(url, &headers)
            .await
            .map_err(|err| BreezyError::TransportFailure(err.to_string()))
    }
}

/// Expiry timestamp `ttl_secs` from now
fn expires_after(ttl_secs: u64) -> DateTime<Utc> {
    let now = Utc::now();
    i64::try_from(ttl_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, BreezyError> {
    if body.trim().is_empty() {
        return Err(BreezyError::ParseFailure("empty response body".to_string()));
    }
    serde_json::from_str(body).map_err(|err| BreezyError::ParseFailure(err.to_string()))
}
