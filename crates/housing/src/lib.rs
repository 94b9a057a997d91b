//! House and flat services.
//!
//! [`FlatService`] owns the flat lifecycle (creation with sequential unit
//! numbers, status updates). [`HouseService`] creates houses and lists the
//! flats of a house as seen by a given caller role.

use flatseller_database::{DatabaseError, FlatStatus};
use thiserror::Error;

pub mod flats;
pub mod houses;
pub mod store;
pub mod visibility;

pub use flats::FlatService;
pub use houses::HouseService;
pub use store::{FlatStore, HouseStore};
pub use visibility::FlatVisibility;

#[derive(Debug, Error)]
pub enum HousingError {
    #[error("invalid flat status")]
    InvalidFlatStatus(String),
    #[error("flat not found")]
    FlatNotFound(i64),
    #[error("status transition not allowed")]
    InvalidStatusTransition { from: FlatStatus, to: FlatStatus },
    #[error("store error: {0}")]
    Store(#[from] DatabaseError),
}

pub type HousingResult<T> = Result<T, HousingError>;
