//! Flat repository for database operations.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use crate::entities::{CreateFlatRequest, Flat, FlatStatus, UpdateFlatRequest};
use crate::types::{DatabaseError, DatabaseResult};

const FLAT_COLUMNS: &str =
    "id, house_id, flat_number, price, rooms, status, created_at, updated_at";

/// Repository for flat database operations
#[derive(Clone)]
pub struct FlatRepository {
    pool: SqlitePool,
}

impl FlatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a flat numbered one past the highest number in its house.
    ///
    /// The number is computed inside the INSERT itself. Two writers racing on
    /// the same house collide on `UNIQUE(house_id, flat_number)` and the loser
    /// gets [`DatabaseError::Duplicate`].
    pub async fn create(&self, request: &CreateFlatRequest) -> DatabaseResult<Flat> {
        let now = Utc::now();

        // RETURNING rows are drained so the autocommit finishes before we return
        let rows = sqlx::query(&format!(
            "INSERT INTO flats (house_id, flat_number, price, rooms, status, created_at, updated_at) \
             VALUES (?1, (SELECT COALESCE(MAX(flat_number), 0) + 1 FROM flats WHERE house_id = ?1), ?2, ?3, ?4, ?5, ?5) \
             RETURNING {FLAT_COLUMNS}"
        ))
        .bind(request.house_id)
        .bind(request.price)
        .bind(request.rooms)
        .bind(FlatStatus::Created.as_str())
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        let row = rows.first().ok_or(sqlx::Error::RowNotFound)?;
        let flat = map_flat(row)?;
        debug!(flat_id = flat.id, house_id = flat.house_id, flat_number = flat.flat_number, "flat row inserted");
        Ok(flat)
    }

    /// Overwrite price, rooms and status in a single statement.
    ///
    /// When `allowed_from` is not empty the row is only written if its current
    /// status is one of them. A missing id and a rejected status both come
    /// back as [`DatabaseError::NotFound`].
    pub async fn update(&self, id: i64, request: &UpdateFlatRequest) -> DatabaseResult<Flat> {
        let guard = if request.allowed_from.is_empty() {
            String::new()
        } else {
            let placeholders = vec!["?"; request.allowed_from.len()].join(", ");
            format!(" AND status IN ({placeholders})")
        };

        let sql = format!(
            "UPDATE flats SET price = ?, rooms = ?, status = ?, updated_at = ? \
             WHERE id = ?{guard} RETURNING {FLAT_COLUMNS}"
        );
        let mut query = sqlx::query(&sql)
            .bind(request.price)
            .bind(request.rooms)
            .bind(request.status.as_str())
            .bind(Utc::now())
            .bind(id);
        for status in &request.allowed_from {
            query = query.bind(status.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        match rows.first() {
            Some(row) => map_flat(row),
            None => Err(DatabaseError::NotFound(format!("flat {id}"))),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Flat>> {
        let rows = sqlx::query(&format!("SELECT {FLAT_COLUMNS} FROM flats WHERE id = ?"))
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        rows.first().map(map_flat).transpose()
    }

    /// Flats of one house ordered by flat number, optionally restricted to a
    /// single status.
    pub async fn list_by_house(
        &self,
        house_id: i64,
        status: Option<FlatStatus>,
    ) -> DatabaseResult<Vec<Flat>> {
        let rows = match status {
            Some(status) => {
                sqlx::query(&format!(
                    "SELECT {FLAT_COLUMNS} FROM flats WHERE house_id = ? AND status = ? ORDER BY flat_number"
                ))
                .bind(house_id)
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {FLAT_COLUMNS} FROM flats WHERE house_id = ? ORDER BY flat_number"
                ))
                .bind(house_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(map_flat).collect()
    }

    pub async fn list_all(&self) -> DatabaseResult<Vec<Flat>> {
        let rows = sqlx::query(&format!(
            "SELECT {FLAT_COLUMNS} FROM flats ORDER BY house_id, flat_number"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_flat).collect()
    }
}

fn map_flat(row: &SqliteRow) -> DatabaseResult<Flat> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<FlatStatus>()
        .map_err(|err| DatabaseError::Decode(err.to_string()))?;

    Ok(Flat {
        id: row.try_get("id")?,
        house_id: row.try_get("house_id")?,
        flat_number: row.try_get("flat_number")?,
        price: row.try_get("price")?,
        rooms: row.try_get("rooms")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
