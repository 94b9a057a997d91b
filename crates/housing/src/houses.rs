//! House creation and role-scoped flat listing.

use flatseller_database::{CreateHouseRequest, Flat, FlatRepository, House, HouseRepository};
use tracing::{debug, info};

use crate::store::{FlatStore, HouseStore};
use crate::visibility::FlatVisibility;
use crate::HousingResult;

#[derive(Clone)]
pub struct HouseService<H = HouseRepository, F = FlatRepository> {
    houses: H,
    flats: F,
}

impl<H: HouseStore, F: FlatStore> HouseService<H, F> {
    pub fn new(houses: H, flats: F) -> Self {
        Self { houses, flats }
    }

    pub async fn save_house(
        &self,
        address: &str,
        year: i64,
        developer: Option<&str>,
    ) -> HousingResult<House> {
        let house = self
            .houses
            .create(&CreateHouseRequest {
                address: address.to_owned(),
                year,
                developer: developer.map(str::to_owned),
            })
            .await?;

        info!(op = "save_house", house_id = house.id, "house created");
        Ok(house)
    }

    /// Flats of a house ordered by unit number, restricted by `visibility`.
    ///
    /// An unknown house yields an empty list.
    pub async fn list_flats(
        &self,
        house_id: i64,
        visibility: FlatVisibility,
    ) -> HousingResult<Vec<Flat>> {
        let flats = self
            .flats
            .list_by_house(house_id, visibility.status_filter())
            .await?;

        debug!(op = "list_flats", house_id, ?visibility, count = flats.len(), "listed flats");
        Ok(flats)
    }
}
