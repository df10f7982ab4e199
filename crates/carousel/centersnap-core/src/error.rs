//! Error taxonomy for the carousel core.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ItemId;

/// External pieces a carousel cannot run without.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Collaborator {
    ScrollRegion,
    Viewport,
    Container,
    LayoutGroup,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collaborator::ScrollRegion => "scroll region",
            Collaborator::Viewport => "viewport",
            Collaborator::Container => "content container",
            Collaborator::LayoutGroup => "horizontal layout group",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CarouselError {
    /// Fatal: the carousel disables itself and ignores further events.
    #[error("carousel disabled: {missing} is missing")]
    Configuration { missing: Collaborator },
    #[error("invalid carousel config: {0}")]
    InvalidConfig(String),
    #[error("carousel config parse error: {0}")]
    ConfigParse(String),
    /// The item left the registry while an animation still targeted it.
    #[error("item {item:?} is no longer registered")]
    StaleTarget { item: ItemId },
    #[error("carousel has no items")]
    EmptyCarousel,
}
