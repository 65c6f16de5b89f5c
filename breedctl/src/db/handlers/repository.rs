//! Base repository trait for catalogue operations.

use crate::db::errors::Result;

/// Base repository trait providing the CRUD surface of an entity.
///
/// Repositories borrow a storage backend rather than owning a connection, so a single
/// repository value can serve any number of calls. Every method either fully applies or leaves
/// storage untouched.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Validate and create a new entity
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities with filtering and pagination
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Delete an entity by ID, failing with `NotFound` when nothing was removed
    async fn delete(&self, id: Self::Id) -> Result<()>;

    /// Apply a partial update and return the entity as stored afterwards
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;
}
