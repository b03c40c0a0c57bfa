//! Core data models for the Breezy integration
//!
//! Identifiers, the access token and the position records returned by the
//! Breezy HR API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a position in Breezy (the `_id` field)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(String);

impl PositionId {
    /// Wraps a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PositionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PositionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque credential issued by the sign-in endpoint
///
/// The value is sent verbatim in the `Authorization` header. `Debug` output
/// never shows it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the token carries no value
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Publication state of a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PositionState {
    Published,
    Draft,
    Closed,
    Archived,
    Pending,
    /// Any state this crate does not know about
    Other(String),
}

impl PositionState {
    /// Returns the wire representation of the state
    pub fn as_str(&self) -> &str {
        match self {
            PositionState::Published => "published",
            PositionState::Draft => "draft",
            PositionState::Closed => "closed",
            PositionState::Archived => "archived",
            PositionState::Pending => "pending",
            PositionState::Other(s) => s,
        }
    }
}

impl From<String> for PositionState {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "published" => PositionState::Published,
            "draft" => PositionState::Draft,
            "closed" => PositionState::Closed,
            "archived" => PositionState::Archived,
            "pending" => PositionState::Pending,
            _ => PositionState::Other(s),
        }
    }
}

impl From<PositionState> for String {
    fn from(state: PositionState) -> Self {
        state.as_str().to_string()
    }
}

/// Position summary, one element of the positions list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "_id")]
    pub id: PositionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PositionState>,
}

/// Full position record returned by the single-position endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDetail {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PositionId>,
    pub name: String,
    /// HTML description as authored in Breezy
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PositionState>,
    /// Public URL where candidates apply
    #[serde(default, alias = "apply_url", skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
    /// Remaining remote fields, available to templates
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Display name and route target for one entry of the positions listing
///
/// The host router turns `route_target` into the URL of the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionLink {
    pub display_name: String,
    pub route_target: PositionId,
}

impl From<&Position> for PositionLink {
    fn from(position: &Position) -> Self {
        Self {
            display_name: position.name.clone(),
            route_target: position.id.clone(),
        }
    }
}
