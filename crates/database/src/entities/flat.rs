//! Flat entity definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;

#[derive(Debug, Clone, PartialEq)]
pub struct Flat {
    pub id: i64,
    pub house_id: i64,
    /// Sequential within the house, starting at 1.
    pub flat_number: i64,
    pub price: i64,
    pub rooms: i64,
    pub status: FlatStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for creating a new flat. The store assigns the number and status.
#[derive(Debug, Clone)]
pub struct CreateFlatRequest {
    pub house_id: i64,
    pub price: i64,
    pub rooms: i64,
}

/// Full overwrite of the mutable flat columns
#[derive(Debug, Clone)]
pub struct UpdateFlatRequest {
    pub price: i64,
    pub rooms: i64,
    pub status: FlatStatus,
    /// Statuses the stored flat must currently have for the write to apply.
    /// Empty means any.
    pub allowed_from: Vec<FlatStatus>,
}

/// Moderation state of a flat listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatStatus {
    #[default]
    Created,
    Moderation,
    Approved,
    Declined,
}

impl FlatStatus {
    pub const ALL: [FlatStatus; 4] = [
        FlatStatus::Created,
        FlatStatus::Moderation,
        FlatStatus::Approved,
        FlatStatus::Declined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlatStatus::Created => "created",
            FlatStatus::Moderation => "moderation",
            FlatStatus::Approved => "approved",
            FlatStatus::Declined => "declined",
        }
    }
}

impl FromStr for FlatStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlatStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("flat status", s))
    }
}

impl fmt::Display for FlatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
