//! Page data for the host's templates and router
//!
//! Maps fetched positions to the fields the detail template renders and the
//! links the listing renders, and turns manager failures into page-level
//! outcomes. Raw remote errors never reach a page.

use serde::Serialize;
use std::sync::Arc;

use crate::api::{BreezyApiManager, BreezyError};
use crate::data::{PositionDetail, PositionId, PositionLink};

/// Label used for the application link on detail pages
pub const APPLY_LINK_LABEL: &str = "Apply for this position";

/// Turns a position identifier into the URL of its detail page
pub trait PositionRouter: Send + Sync {
    fn position_url(&self, position_id: &PositionId) -> String;
}

/// Router mounting detail pages under a fixed path prefix
#[derive(Debug, Clone)]
pub struct PathRouter {
    prefix: String,
}

impl PathRouter {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().trim_end_matches('/').to_string();
        Self { prefix }
    }
}

impl PositionRouter for PathRouter {
    fn position_url(&self, position_id: &PositionId) -> String {
        format!("{}/{}", self.prefix, position_id)
    }
}

/// Anchor pointing at the application form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationLink {
    pub label: String,
    pub url: String,
}

/// Fields the position detail template renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionPage {
    pub name: String,
    pub description: String,
    pub application_link: Option<ApplicationLink>,
    pub application_url: Option<String>,
}

impl PositionPage {
    /// Builds page fields from a position record
    ///
    /// `application_url` takes precedence over the URL carried by the record.
    pub fn from_detail(detail: &PositionDetail, application_url: Option<&str>) -> Self {
        let application_url = application_url
            .map(str::to_string)
            .or_else(|| detail.application_url.clone())
            .filter(|url| !url.trim().is_empty());

        let application_link = application_url.as_ref().map(|url| ApplicationLink {
            label: APPLY_LINK_LABEL.to_string(),
            url: url.clone(),
        });

        Self {
            name: detail.name.clone(),
            description: detail.description.clone(),
            application_link,
            application_url,
        }
    }
}

/// One entry of the positions listing, resolved to a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedLink {
    pub display_name: String,
    pub url: String,
}

impl RoutedLink {
    pub fn resolve(link: &PositionLink, router: &dyn PositionRouter) -> Self {
        Self {
            display_name: link.display_name.clone(),
            url: router.position_url(&link.route_target),
        }
    }
}

/// What the host should render for a page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome<T> {
    Rendered(T),
    /// The requested position does not exist (404 page)
    NotFound,
    /// Breezy could not be reached or answered badly (generic error page)
    Unavailable,
}

impl<T> PageOutcome<T> {
    pub fn is_rendered(&self) -> bool {
        matches!(self, PageOutcome::Rendered(_))
    }
}

impl<T> From<Result<T, BreezyError>> for PageOutcome<T> {
    fn from(result: Result<T, BreezyError>) -> Self {
        match result {
            Ok(value) => PageOutcome::Rendered(value),
            Err(BreezyError::NotFound(_)) => PageOutcome::NotFound,
            Err(_) => PageOutcome::Unavailable,
        }
    }
}

/// Request-scoped handler for the positions pages
///
/// A detail page asks for the title and the body separately; the position
/// fetched for one is reused for the other within the same controller.
pub struct PositionController {
    manager: Arc<BreezyApiManager>,
    router: Arc<dyn PositionRouter>,
    position: Option<(PositionId, PositionDetail)>,
}

impl PositionController {
    pub fn new(manager: Arc<BreezyApiManager>, router: Arc<dyn PositionRouter>) -> Self {
        Self {
            manager,
            router,
            position: None,
        }
    }

    /// Body of the position detail page
    pub async fn position_detail(&mut self, position_id: &PositionId) -> PageOutcome<PositionPage> {
        self.load(position_id)
            .await
            .map(|detail| PositionPage::from_detail(detail, None))
            .into()
    }

    /// Title of the position detail page, if the position can be loaded
    pub async fn position_title(&mut self, position_id: &PositionId) -> Option<String> {
        self.load(position_id).await.ok().map(|detail| detail.name.clone())
    }

    /// Links for the positions listing page
    pub async fn positions_list(&self) -> PageOutcome<Vec<RoutedLink>> {
        self.manager
            .list_position_links()
            .await
            .map(|links| {
                links
                    .iter()
                    .map(|link| RoutedLink::resolve(link, self.router.as_ref()))
                    .collect()
            })
            .into()
    }

    async fn load(&mut self, position_id: &PositionId) -> Result<&PositionDetail, BreezyError> {
        let position = match self.position.take() {
            Some(memo) if &memo.0 == position_id => memo,
            _ => {
                let detail = self.manager.get_position_detail(position_id, false).await?;
                (position_id.clone(), detail)
            }
        };
        Ok(&self.position.insert(position).1)
    }
}
