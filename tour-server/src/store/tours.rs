//! Tour persistence.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::{NewTour, Tour, TourEdit, Waypoint};

use super::error::StoreError;

const COLLECTION: &str = "tour";

/// Tours collection backed by `SQLite`.
///
/// Waypoints and route geometry are stored as JSON text and are written
/// only on insert.
#[derive(Debug, Clone)]
pub struct TourRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct TourRow {
    name: String,
    description: Option<String>,
    waypoints: String,
    route_geojson: String,
    created: DateTime<Utc>,
}

impl TryFrom<TourRow> for Tour {
    type Error = StoreError;

    fn try_from(row: TourRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, e: serde_json::Error| StoreError::Corrupt {
            collection: COLLECTION,
            message: format!("{field} of {:?}: {e}", row.name),
        };

        let waypoints: Vec<Waypoint> =
            serde_json::from_str(&row.waypoints).map_err(|e| corrupt("waypoints", e))?;
        let route_geojson =
            serde_json::from_str(&row.route_geojson).map_err(|e| corrupt("route_geojson", e))?;

        Ok(Tour {
            name: row.name,
            description: row.description,
            waypoints,
            route_geojson,
            created: row.created,
        })
    }
}

impl TourRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a tour and return its row id.
    pub async fn create(&self, tour: &NewTour) -> Result<i64, StoreError> {
        let waypoints = serde_json::to_string(tour.waypoints()).map_err(|e| StoreError::Corrupt {
            collection: COLLECTION,
            message: format!("cannot encode waypoints: {e}"),
        })?;

        let result = sqlx::query(
            "INSERT INTO tours (name, description, waypoints, route_geojson, created) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(tour.name())
        .bind(tour.description())
        .bind(waypoints)
        .bind(tour.route_geojson().to_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from_write(COLLECTION, tour.name(), e))?;

        let id = result.last_insert_rowid();
        tracing::debug!(name = tour.name(), id, waypoints = tour.waypoints().len(), "tour created");
        Ok(id)
    }

    /// All tours in insertion order, with waypoints and route geometry.
    pub async fn list(&self) -> Result<Vec<Tour>, StoreError> {
        let rows = sqlx::query_as::<_, TourRow>(
            "SELECT name, description, waypoints, route_geojson, created FROM tours ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Tour::try_from).collect()
    }

    /// Look up a tour by name.
    pub async fn get(&self, name: &str) -> Result<Option<Tour>, StoreError> {
        let row = sqlx::query_as::<_, TourRow>(
            "SELECT name, description, waypoints, route_geojson, created FROM tours WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Tour::try_from).transpose()
    }

    /// Delete the tour called `name`, if any.
    ///
    /// Deleting a missing tour is not an error. Returns whether a row was
    /// removed.
    pub async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tours WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        tracing::debug!(name, removed, "tour delete");
        Ok(removed)
    }

    /// Update name and description of the tour called `old_name`.
    pub async fn edit(&self, old_name: &str, edit: &TourEdit) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE tours SET name = ?, description = ? WHERE name = ?")
            .bind(edit.name())
            .bind(edit.description())
            .bind(old_name)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_write(COLLECTION, edit.name(), e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: COLLECTION,
                name: old_name.to_string(),
            });
        }

        tracing::debug!(old_name, new_name = edit.name(), "tour edited");
        Ok(())
    }
}
