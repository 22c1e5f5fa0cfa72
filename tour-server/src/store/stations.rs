//! Station persistence.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::{NewStation, Station, StationEdit};

use super::error::StoreError;

const COLLECTION: &str = "station";

/// Stations collection backed by `SQLite`.
#[derive(Debug, Clone)]
pub struct StationRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct StationRow {
    name: String,
    description: String,
    url: Option<String>,
    geojson: String,
    created: DateTime<Utc>,
}

impl TryFrom<StationRow> for Station {
    type Error = StoreError;

    fn try_from(row: StationRow) -> Result<Self, Self::Error> {
        let geojson = serde_json::from_str(&row.geojson).map_err(|e| StoreError::Corrupt {
            collection: COLLECTION,
            message: format!("geojson of {:?}: {e}", row.name),
        })?;

        Ok(Station {
            name: row.name,
            description: row.description,
            url: row.url,
            geojson,
            created: row.created,
        })
    }
}

impl StationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a station and return its row id.
    ///
    /// Fails with `Conflict` if the name is taken; the existing station is
    /// left as it was.
    pub async fn create(&self, station: &NewStation) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO stations (name, description, url, geojson, created) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(station.name())
        .bind(station.description())
        .bind(station.url())
        .bind(station.geojson().to_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from_write(COLLECTION, station.name(), e))?;

        let id = result.last_insert_rowid();
        tracing::debug!(name = station.name(), id, "station created");
        Ok(id)
    }

    /// All stations in insertion order.
    ///
    /// Not paginated: every station is returned.
    pub async fn list(&self) -> Result<Vec<Station>, StoreError> {
        let rows = sqlx::query_as::<_, StationRow>(
            "SELECT name, description, url, geojson, created FROM stations ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Station::try_from).collect()
    }

    /// Look up a station by name.
    pub async fn get(&self, name: &str) -> Result<Option<Station>, StoreError> {
        let row = sqlx::query_as::<_, StationRow>(
            "SELECT name, description, url, geojson, created FROM stations WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Station::try_from).transpose()
    }

    /// Delete the station called `name`.
    ///
    /// Fails with `NotFound` if there is none, so a repeated delete is
    /// distinguishable from the first.
    pub async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM stations WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: COLLECTION,
                name: name.to_string(),
            });
        }

        tracing::debug!(name, "station deleted");
        Ok(())
    }

    /// Update name, description and url of the station called `old_name`.
    ///
    /// Geometry and creation time are never touched. Renaming onto another
    /// station's name fails with `Conflict`.
    pub async fn edit(&self, old_name: &str, edit: &StationEdit) -> Result<(), StoreError> {
        let result =
            sqlx::query("UPDATE stations SET name = ?, description = ?, url = ? WHERE name = ?")
                .bind(edit.name())
                .bind(edit.description())
                .bind(edit.url())
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

        tracing::debug!(old_name, new_name = edit.name(), "station edited");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::setup_test_database;
    use serde_json::{Value, json};

    async fn repo() -> StationRepository {
        StationRepository::new(setup_test_database().await.unwrap())
    }

    fn point(lng: f64, lat: f64) -> Value {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [lng, lat] }
        })
    }

    fn new_station(name: &str) -> NewStation {
        NewStation::new(name, "desc", Some(String::new()), &point(10.0, 50.0)).unwrap()
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let repo = repo().await;
        repo.create(&new_station("A")).await.unwrap();

        let stations = repo.list().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "A");
        assert_eq!(stations[0].description, "desc");
        assert_eq!(stations[0].url.as_deref(), Some(""));
        assert_eq!(stations[0].geojson, point(10.0, 50.0));
    }

    #[tokio::test]
    async fn duplicate_create_conflicts_and_keeps_original() {
        let repo = repo().await;
        repo.create(&new_station("A")).await.unwrap();

        let other = NewStation::new("A", "other", None, &point(1.0, 2.0)).unwrap();
        let err = repo.create(&other).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        let stations = repo.list().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].description, "desc");
        assert_eq!(stations[0].geojson, point(10.0, 50.0));
    }

    #[tokio::test]
    async fn create_returns_distinct_ids() {
        let repo = repo().await;
        let a = repo.create(&new_station("A")).await.unwrap();
        let b = repo.create(&new_station("B")).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn delete_twice_yields_not_found() {
        let repo = repo().await;
        repo.create(&new_station("A")).await.unwrap();
        repo.create(&new_station("B")).await.unwrap();

        repo.delete("A").await.unwrap();
        let err = repo.delete("A").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["B"]);
    }

    #[tokio::test]
    async fn edit_keeps_geometry_and_created() {
        let repo = repo().await;
        repo.create(&new_station("A")).await.unwrap();
        let before = repo.get("A").await.unwrap().unwrap();

        let edit = StationEdit::new("A2", "new text", Some("https://example.org")).unwrap();
        repo.edit("A", &edit).await.unwrap();

        assert!(repo.get("A").await.unwrap().is_none());
        let after = repo.get("A2").await.unwrap().unwrap();
        assert_eq!(after.description, "new text");
        assert_eq!(after.url.as_deref(), Some("https://example.org"));
        assert_eq!(after.geojson, before.geojson);
        assert_eq!(after.created, before.created);
    }

    #[tokio::test]
    async fn edit_onto_existing_name_conflicts() {
        let repo = repo().await;
        repo.create(&new_station("A")).await.unwrap();
        repo.create(&new_station("B")).await.unwrap();

        let edit = StationEdit::new("B", "desc", None).unwrap();
        let err = repo.edit("A", &edit).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert!(repo.get("A").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn edit_keeping_name_is_allowed() {
        let repo = repo().await;
        repo.create(&new_station("A")).await.unwrap();

        let edit = StationEdit::new("A", "changed", None).unwrap();
        repo.edit("A", &edit).await.unwrap();
        assert_eq!(repo.get("A").await.unwrap().unwrap().description, "changed");
    }

    #[tokio::test]
    async fn edit_missing_station_is_not_found() {
        let repo = repo().await;
        let edit = StationEdit::new("B", "desc", None).unwrap();
        let err = repo.edit("nope", &edit).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
