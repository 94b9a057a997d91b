//! House entity definitions

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct House {
    pub id: i64,
    pub address: String,
    pub year: i64,
    pub developer: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Never written by this service; kept so the column round-trips.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request for creating a new house
#[derive(Debug, Clone)]
pub struct CreateHouseRequest {
    pub address: String,
    pub year: i64,
    pub developer: Option<String>,
}
