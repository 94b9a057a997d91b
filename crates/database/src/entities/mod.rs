//! Domain entities for the database layer

pub mod flat;
pub mod house;
pub mod user;

pub use flat::{CreateFlatRequest, Flat, FlatStatus, UpdateFlatRequest};
pub use house::{CreateHouseRequest, House};
pub use user::{CreateUserRequest, Role, User};

use thiserror::Error;

/// A string that does not name any variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
