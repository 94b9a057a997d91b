//! Flat lifecycle: creation and moderation updates.

use flatseller_database::{CreateFlatRequest, Flat, FlatRepository, FlatStatus, UpdateFlatRequest};
use tracing::{debug, info};

use crate::store::FlatStore;
use crate::{HousingError, HousingResult};

#[derive(Clone)]
pub struct FlatService<S = FlatRepository> {
    store: S,
}

impl<S: FlatStore> FlatService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a flat in `created` status with the next unit number of its house.
    pub async fn save_flat(&self, house_id: i64, price: i64, rooms: i64) -> HousingResult<Flat> {
        let flat = self
            .store
            .create(&CreateFlatRequest {
                house_id,
                price,
                rooms,
            })
            .await?;

        info!(
            op = "save_flat",
            flat_id = flat.id,
            house_id,
            flat_number = flat.flat_number,
            "flat created"
        );
        Ok(flat)
    }

    /// Overwrite price, rooms and status of an existing flat.
    ///
    /// The status string is validated before the store is touched. With
    /// `strict-transitions` the allowed predecessors are part of the UPDATE
    /// itself, so the check and the write are one statement.
    pub async fn update_flat(
        &self,
        flat_id: i64,
        price: i64,
        rooms: i64,
        status: &str,
    ) -> HousingResult<Flat> {
        let status = status
            .parse::<FlatStatus>()
            .map_err(|err| HousingError::InvalidFlatStatus(err.value))?;

        let request = UpdateFlatRequest {
            price,
            rooms,
            status,
            allowed_from: allowed_predecessors(status),
        };

        let flat = match self.store.update(flat_id, &request).await {
            Ok(flat) => flat,
            Err(err) if err.is_not_found() => return Err(self.rejected_update(flat_id, status).await),
            Err(err) => return Err(HousingError::Store(err)),
        };

        debug!(op = "update_flat", flat_id, %status, "flat updated");
        Ok(flat)
    }

    /// Explain an UPDATE that matched no row.
    #[cfg(feature = "strict-transitions")]
    async fn rejected_update(&self, flat_id: i64, to: FlatStatus) -> HousingError {
        match self.store.find_by_id(flat_id).await {
            Ok(Some(current)) => HousingError::InvalidStatusTransition {
                from: current.status,
                to,
            },
            Ok(None) => HousingError::FlatNotFound(flat_id),
            Err(err) => HousingError::Store(err),
        }
    }

    #[cfg(not(feature = "strict-transitions"))]
    async fn rejected_update(&self, flat_id: i64, _to: FlatStatus) -> HousingError {
        HousingError::FlatNotFound(flat_id)
    }
}

/// Moderation workflow: created -> moderation -> approved | declined, and a
/// declined flat may go back to moderation. Keeping the status is always allowed.
#[cfg(feature = "strict-transitions")]
pub fn transition_allowed(from: FlatStatus, to: FlatStatus) -> bool {
    use FlatStatus::*;

    from == to
        || matches!(
            (from, to),
            (Created, Moderation)
                | (Moderation, Approved)
                | (Moderation, Declined)
                | (Declined, Moderation)
        )
}

/// Statuses a flat may be in for an update to `to` to apply. Empty means any.
#[cfg(feature = "strict-transitions")]
fn allowed_predecessors(to: FlatStatus) -> Vec<FlatStatus> {
    FlatStatus::ALL
        .into_iter()
        .filter(|&from| transition_allowed(from, to))
        .collect()
}

#[cfg(not(feature = "strict-transitions"))]
fn allowed_predecessors(_to: FlatStatus) -> Vec<FlatStatus> {
    Vec::new()
}
