//! Badge variants and their background templates.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which event badge is being composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Speaking,
    #[default]
    Attending,
}

/// A string did not name a known badge variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown badge variant '{0}' (expected 'speaking' or 'attending')")]
pub struct UnknownVariant(pub String);

impl BadgeVariant {
    pub const ALL: [BadgeVariant; 2] = [BadgeVariant::Speaking, BadgeVariant::Attending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speaking => "speaking",
            Self::Attending => "attending",
        }
    }

    /// File name of the background template inside the assets directory.
    pub fn background_file(&self) -> &'static str {
        match self {
            Self::Speaking => "joinme_speaking.jpg",
            Self::Attending => "joinme_attending.jpg",
        }
    }

    /// Full path of the background template under `assets_dir`.
    pub fn background_path(&self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(self.background_file())
    }

    /// Resolve a route such as `/speaking` to its variant.
    pub fn from_route(route: &str) -> Option<Self> {
        route.trim_matches('/').parse().ok()
    }
}

impl FromStr for BadgeVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "speaking" => Ok(Self::Speaking),
            "attending" => Ok(Self::Attending),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
