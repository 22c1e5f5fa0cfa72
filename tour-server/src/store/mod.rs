//! Document store for stations and tours.
//!
//! Each collection is a `SQLite` table keyed by a unique `name`. JSON
//! payloads are stored as text and returned exactly as they were written.

mod error;
mod setup;
mod stations;
mod tours;

pub use error::StoreError;
pub use setup::setup_database;
#[cfg(test)]
pub use setup::setup_test_database;
pub use stations::StationRepository;
pub use tours::TourRepository;
