//! Affiliate network identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of affiliate networks the service can track through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Awin,
    Cj,
    Amazon,
}

impl NetworkKind {
    /// Stable lowercase name used in logs and decision records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Awin => "awin",
            Self::Cj => "cj",
            Self::Amazon => "amazon",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A network together with its per-partner parameters.
///
/// Only AWIN needs a per-merchant identifier. CJ and Amazon are attributed
/// through process-wide credentials, so their variants carry nothing and an
/// AWIN merchant id can never be read off them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    /// AWIN advertiser program, identified by its merchant id (`awinmid`).
    Awin { mid: String },
    Cj,
    Amazon,
}

impl Network {
    pub fn kind(&self) -> NetworkKind {
        match self {
            Self::Awin { .. } => NetworkKind::Awin,
            Self::Cj => NetworkKind::Cj,
            Self::Amazon => NetworkKind::Amazon,
        }
    }
}
