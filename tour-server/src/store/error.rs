//! Store error types.

/// Errors from the station and tour store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A document with this name already exists
    #[error("{collection} {name:?} already exists")]
    Conflict {
        collection: &'static str,
        name: String,
    },

    /// No document with this name
    #[error("{collection} {name:?} not found")]
    NotFound {
        collection: &'static str,
        name: String,
    },

    /// A stored JSON column could not be decoded
    #[error("corrupt {collection} document: {message}")]
    Corrupt {
        collection: &'static str,
        message: String,
    },

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a write error, turning a unique-index violation into `Conflict`.
    pub(crate) fn from_write(collection: &'static str, name: &str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict {
                collection,
                name: name.to_string(),
            },
            _ => StoreError::Database(err),
        }
    }
}
