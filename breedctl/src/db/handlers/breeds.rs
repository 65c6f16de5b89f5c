//! Repository for the breed catalogue.

use crate::db::{
    errors::{DbError, RecordRef, Result},
    handlers::repository::Repository,
    models::breeds::{Breed, BreedCreateDBRequest, BreedUpdateDBRequest, ImportSummary},
    query::{BreedFilter, ListQuery},
    store::BreedStore,
};
use crate::types::{BreedId, Operation};
use tracing::{debug, info, instrument};

pub struct Breeds<'s> {
    store: &'s dyn BreedStore,
}

impl<'s> Breeds<'s> {
    pub fn new(store: &'s dyn BreedStore) -> Self {
        Self { store }
    }

    /// Upsert every record in one all-or-nothing batch.
    ///
    /// Records are applied in order, so a later record with the same id overwrites an earlier
    /// one. The first failing record aborts the batch and is reported with its 1-based position;
    /// nothing from the batch is kept in that case.
    #[instrument(skip(self, records), fields(count = records.len()), err)]
    pub async fn import(&self, records: &[Breed]) -> Result<ImportSummary> {
        if records.is_empty() {
            return Ok(ImportSummary { imported: 0 });
        }

        let mut batch = self.store.begin_import().await.map_err(DbError::during(Operation::Import))?;

        for (index, record) in records.iter().enumerate() {
            // An early return drops `batch`, which discards everything written so far
            batch.upsert(record).await.map_err(|source| DbError::ImportRecord {
                position: index + 1,
                record: RecordRef {
                    id: record.id,
                    name: record.name.clone(),
                },
                source,
            })?;
        }

        batch.commit().await.map_err(DbError::during(Operation::Import))?;
        info!(imported = records.len(), "Breed import committed");

        Ok(ImportSummary {
            imported: records.len(),
        })
    }
}

#[async_trait::async_trait]
impl<'s> Repository for Breeds<'s> {
    type CreateRequest = BreedCreateDBRequest;
    type UpdateRequest = BreedUpdateDBRequest;
    type Response = Breed;
    type Id = BreedId;
    type Filter = BreedFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        request.validate()?;
        let breed = self.store.insert(request).await.map_err(DbError::during(Operation::Create))?;
        debug!(breed_id = breed.id, "Created breed");
        Ok(breed)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>> {
        self.store.fetch_by_id(id).await.map_err(DbError::during(Operation::Get))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, offset = filter.offset), err)]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let query = ListQuery::from_filter(filter);
        self.store.fetch(&query).await.map_err(DbError::during(Operation::List))
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: Self::Id) -> Result<()> {
        let deleted = self.store.delete(id).await.map_err(DbError::during(Operation::Delete))?;
        if deleted == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let changes = request.changes();
        if changes.is_empty() {
            return Err(DbError::NoFieldsToUpdate);
        }

        self.store
            .update(id, &changes)
            .await
            .map_err(DbError::during(Operation::Update))?
            .ok_or(DbError::NotFound)
    }
}
