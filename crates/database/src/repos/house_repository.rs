//! House repository for database operations.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::entities::{CreateHouseRequest, House};
use crate::types::DatabaseResult;

const HOUSE_COLUMNS: &str = "id, address, year, developer, created_at, updated_at";

/// Repository for house database operations
#[derive(Clone)]
pub struct HouseRepository {
    pool: SqlitePool,
}

impl HouseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a house and return the stored row.
    pub async fn create(&self, request: &CreateHouseRequest) -> DatabaseResult<House> {
        let rows = sqlx::query(&format!(
            "INSERT INTO houses (address, year, developer, created_at) VALUES (?, ?, ?, ?) RETURNING {HOUSE_COLUMNS}"
        ))
        .bind(&request.address)
        .bind(request.year)
        .bind(&request.developer)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        let row = rows.first().ok_or(sqlx::Error::RowNotFound)?;
        map_house(row)
    }

    /// Every house ordered by id, used by the data dump command.
    pub async fn list_all(&self) -> DatabaseResult<Vec<House>> {
        let rows = sqlx::query(&format!("SELECT {HOUSE_COLUMNS} FROM houses ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_house).collect()
    }
}

fn map_house(row: &SqliteRow) -> DatabaseResult<House> {
    Ok(House {
        id: row.try_get("id")?,
        address: row.try_get("address")?,
        year: row.try_get("year")?,
        developer: row.try_get("developer")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
