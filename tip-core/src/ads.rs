//! Seam to the external ad network.
//!
//! The core hands a [`PlacementId`] to an [`AdCollaborator`] and consumes
//! nothing back. [`AdRegion`] owns the single banner slot of the screen and
//! makes sure it is requested at most once.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Public test banner placement of the ad network, used when nothing else is
/// configured.
///
/// It stands in for the production banner slot
/// `ca-app-pub-8163475936982739/1267348899`, which release builds set through
/// `[ads] placement_id` or `--placement`.
pub const TEST_BANNER_PLACEMENT: &str = "ca-app-pub-3940256099942544/6300978111";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdError {
    #[error("ad placement identifier is empty")]
    EmptyPlacement,
}

/// Opaque identifier of an ad inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlacementId(String);

impl PlacementId {
    pub fn new(id: impl Into<String>) -> Result<Self, AdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AdError::EmptyPlacement);
        }
        Ok(Self(id))
    }

    /// The [`TEST_BANNER_PLACEMENT`] slot.
    pub fn test_banner() -> Self {
        Self(TEST_BANNER_PLACEMENT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlacementId {
    type Error = AdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlacementId> for String {
    fn from(value: PlacementId) -> Self {
        value.0
    }
}

impl fmt::Display for PlacementId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// External collaborator that fetches and renders an ad for a placement.
///
/// Implementations own their network and rendering lifecycle; callers never
/// wait on them or observe the outcome.
pub trait AdCollaborator {
    fn load(
        &self,
        placement: &PlacementId,
    );
}

/// Collaborator that records requests in the log and renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAdCollaborator;

impl AdCollaborator for LoggingAdCollaborator {
    fn load(
        &self,
        placement: &PlacementId,
    ) {
        info!(%placement, "banner ad requested");
    }
}

/// The one ad region of the screen.
#[derive(Debug)]
pub struct AdRegion<C: AdCollaborator = LoggingAdCollaborator> {
    placement: PlacementId,
    collaborator: C,
    requested: bool,
}

impl<C: AdCollaborator> AdRegion<C> {
    pub fn new(
        placement: PlacementId,
        collaborator: C,
    ) -> Self {
        Self {
            placement,
            collaborator,
            requested: false,
        }
    }

    pub fn placement(&self) -> &PlacementId {
        &self.placement
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Asks the collaborator for an ad unless this region already did.
    ///
    /// Returns `true` when a request was issued by this call.
    pub fn request(&mut self) -> bool {
        if self.requested {
            debug!(placement = %self.placement, "ad already requested for region");
            return false;
        }

        self.collaborator.load(&self.placement);
        self.requested = true;
        true
    }
}
