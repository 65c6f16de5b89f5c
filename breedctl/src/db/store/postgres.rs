//! PostgreSQL backend.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::instrument;

use super::{BreedStore, ImportBatch};
use crate::db::errors::StorageResult;
use crate::db::models::breeds::{Breed, BreedCreateDBRequest, FieldChange};
use crate::db::query::{BREED_COLUMNS, ListQuery};
use crate::types::BreedId;

const INSERT_BREED: &str = "INSERT INTO breeds (species, pet_size, name, average_male_adult_weight, average_female_adult_weight) \
     VALUES ($1, $2, $3, $4, $5) \
     RETURNING id, species, pet_size, name, average_male_adult_weight, average_female_adult_weight";

const SELECT_BREED: &str = "SELECT id, species, pet_size, name, average_male_adult_weight, average_female_adult_weight \
     FROM breeds WHERE id = $1";

const DELETE_BREED: &str = "DELETE FROM breeds WHERE id = $1";

// `name` is left out of the conflict assignments: re-importing a row never renames it
const UPSERT_BREED: &str = "INSERT INTO breeds (id, species, pet_size, name, average_male_adult_weight, average_female_adult_weight) \
     VALUES ($1, $2, $3, $4, $5, $6) \
     ON CONFLICT (id) DO UPDATE SET \
     species = EXCLUDED.species, \
     pet_size = EXCLUDED.pet_size, \
     average_male_adult_weight = EXCLUDED.average_male_adult_weight, \
     average_female_adult_weight = EXCLUDED.average_female_adult_weight";

// Explicit ids bypass the SERIAL sequence, so it has to be moved past them before the next insert
const ADVANCE_ID_SEQUENCE: &str =
    "SELECT setval(pg_get_serial_sequence('breeds', 'id'), GREATEST(COALESCE(MAX(id), 0), 1), true) FROM breeds";

/// Breed storage backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgBreedStore {
    pool: PgPool,
}

impl PgBreedStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BreedStore for PgBreedStore {
    #[instrument(skip(self, query), err)]
    async fn fetch(&self, query: &ListQuery) -> StorageResult<Vec<Breed>> {
        let mut query = query.build();
        let breeds = query.build_query_as::<Breed>().fetch_all(&self.pool).await?;
        Ok(breeds)
    }

    #[instrument(skip(self), err)]
    async fn fetch_by_id(&self, id: BreedId) -> StorageResult<Option<Breed>> {
        let breed = sqlx::query_as::<_, Breed>(SELECT_BREED)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(breed)
    }

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn insert(&self, request: &BreedCreateDBRequest) -> StorageResult<Breed> {
        let breed = sqlx::query_as::<_, Breed>(INSERT_BREED)
            .bind(&request.species)
            .bind(&request.pet_size)
            .bind(&request.name)
            .bind(request.average_male_adult_weight)
            .bind(request.average_female_adult_weight)
            .fetch_one(&self.pool)
            .await?;
        Ok(breed)
    }

    #[instrument(skip(self, changes), fields(fields = changes.len()), err)]
    async fn update(&self, id: BreedId, changes: &[FieldChange]) -> StorageResult<Option<Breed>> {
        if changes.is_empty() {
            return self.fetch_by_id(id).await;
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE breeds SET ");
        {
            let mut assignments = query.separated(", ");
            for change in changes {
                assignments.push(format!("{} = ", change.column()));
                match change {
                    FieldChange::Species(value) | FieldChange::PetSize(value) | FieldChange::Name(value) => {
                        assignments.push_bind_unseparated(value.clone());
                    }
                    FieldChange::AverageMaleAdultWeight(value) | FieldChange::AverageFemaleAdultWeight(value) => {
                        assignments.push_bind_unseparated(*value);
                    }
                }
            }
        }
        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(format!(" RETURNING {BREED_COLUMNS}"));

        let breed = query.build_query_as::<Breed>().fetch_optional(&self.pool).await?;
        Ok(breed)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: BreedId) -> StorageResult<u64> {
        let result = sqlx::query(DELETE_BREED).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self), err)]
    async fn begin_import(&self) -> StorageResult<Box<dyn ImportBatch>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgImportBatch { tx }))
    }
}

/// Import batch running inside a single transaction. Dropping it rolls the transaction back.
struct PgImportBatch {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ImportBatch for PgImportBatch {
    async fn upsert(&mut self, breed: &Breed) -> StorageResult<()> {
        sqlx::query(UPSERT_BREED)
            .bind(breed.id)
            .bind(&breed.species)
            .bind(&breed.pet_size)
            .bind(&breed.name)
            .bind(breed.average_male_adult_weight)
            .bind(breed.average_female_adult_weight)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let mut batch = *self;
        sqlx::query(ADVANCE_ID_SEQUENCE).execute(&mut *batch.tx).await?;
        batch.tx.commit().await?;
        Ok(())
    }
}
