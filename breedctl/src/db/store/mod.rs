//! Storage backends for the breed catalogue.
//!
//! [`BreedStore`] is the seam between the engines in [`crate::db::handlers`] and the place rows
//! actually live. Backends only persist and fetch; validation, the "no fields" rule and the
//! rows-affected to [`NotFound`](crate::db::errors::DbError::NotFound) translation all happen in
//! the engines, so every backend behaves the same to callers.
//!
//! - [`postgres::PgBreedStore`]: the production backend, one SQL statement per operation
//! - [`in_memory::InMemoryBreedStore`]: a lock-protected map that enforces the same constraints,
//!   used for tests and for running without a database

use async_trait::async_trait;

use crate::db::errors::StorageResult;
use crate::db::models::breeds::{Breed, BreedCreateDBRequest, FieldChange};
use crate::db::query::ListQuery;
use crate::types::BreedId;

pub mod in_memory;
pub mod postgres;


/// Persistence operations for breeds.
#[async_trait]
pub trait BreedStore: Send + Sync {
    /// Run a listing query. No matching rows is an empty vector.
    async fn fetch(&self, query: &ListQuery) -> StorageResult<Vec<Breed>>;

    async fn fetch_by_id(&self, id: BreedId) -> StorageResult<Option<Breed>>;

    /// Insert a new row, letting the store assign its id.
    async fn insert(&self, request: &BreedCreateDBRequest) -> StorageResult<Breed>;

    /// Apply the given column assignments in a single statement.
    ///
    /// # Returns
    /// The row as stored afterwards, or `None` when no row has this id.
    async fn update(&self, id: BreedId, changes: &[FieldChange]) -> StorageResult<Option<Breed>>;

    /// Remove a row, returning how many rows were deleted.
    async fn delete(&self, id: BreedId) -> StorageResult<u64>;

    /// Open an all-or-nothing import batch.
    ///
    /// Dropping the batch without calling [`ImportBatch::commit`] discards everything it wrote.
    async fn begin_import(&self) -> StorageResult<Box<dyn ImportBatch>>;
}

/// A unit of work for bulk import, owning its transaction.
#[async_trait]
pub trait ImportBatch: Send {
    /// Insert the record under its own id, or refresh species, pet size and both weights of the
    /// row already holding that id. An existing row keeps its name.
    async fn upsert(&mut self, breed: &Breed) -> StorageResult<()>;

    /// Make every upsert visible at once and move id allocation past the largest stored id.
    async fn commit(self: Box<Self>) -> StorageResult<()>;
}
