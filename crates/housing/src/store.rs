//! Persistence seams for the housing services.

use flatseller_database::{
    CreateFlatRequest, CreateHouseRequest, DatabaseResult, Flat, FlatRepository, FlatStatus,
    House, HouseRepository, UpdateFlatRequest,
};

pub trait FlatStore {
    async fn create(&self, request: &CreateFlatRequest) -> DatabaseResult<Flat>;
    async fn update(&self, id: i64, request: &UpdateFlatRequest) -> DatabaseResult<Flat>;
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Flat>>;
    async fn list_by_house(
        &self,
        house_id: i64,
        status: Option<FlatStatus>,
    ) -> DatabaseResult<Vec<Flat>>;
}

pub trait HouseStore {
    async fn create(&self, request: &CreateHouseRequest) -> DatabaseResult<House>;
}

impl FlatStore for FlatRepository {
    async fn create(&self, request: &CreateFlatRequest) -> DatabaseResult<Flat> {
        FlatRepository::create(self, request).await
    }

    async fn update(&self, id: i64, request: &UpdateFlatRequest) -> DatabaseResult<Flat> {
        FlatRepository::update(self, id, request).await
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Flat>> {
        FlatRepository::find_by_id(self, id).await
    }

    async fn list_by_house(
        &self,
        house_id: i64,
        status: Option<FlatStatus>,
    ) -> DatabaseResult<Vec<Flat>> {
        FlatRepository::list_by_house(self, house_id, status).await
    }
}

impl HouseStore for HouseRepository {
    async fn create(&self, request: &CreateHouseRequest) -> DatabaseResult<House> {
        HouseRepository::create(self, request).await
    }
}
