//! In-memory storage backend.
//!
//! Rows live in a `BTreeMap` behind a tokio `RwLock`. The table's check constraints are enforced
//! here too, so a failing record is rejected the same way by both backends. Import batches hold
//! the write lock for their whole lifetime and stage changes on a copy of the table, which
//! replaces the live one only on commit. Data is lost on restart.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use super::{BreedStore, ImportBatch};
use crate::db::errors::{StorageError, StorageResult};
use crate::db::models::breeds::{Breed, BreedCreateDBRequest, FieldChange};
use crate::db::query::ListQuery;
use crate::types::BreedId;

#[derive(Debug, Clone, Default)]
struct Table {
    rows: BTreeMap<BreedId, Breed>,
    /// Last id handed out by `insert`
    last_id: BreedId,
}

impl Table {
    /// Next free id. Fails once the `INTEGER` range is used up, as the sequence does.
    fn allocate_id(&mut self) -> StorageResult<BreedId> {
        loop {
            self.last_id = self
                .last_id
                .checked_add(1)
                .ok_or_else(|| StorageError::Other(anyhow!("breed id sequence reached its maximum value")))?;
            if !self.rows.contains_key(&self.last_id) {
                return Ok(self.last_id);
            }
        }
    }
}

/// Breed storage held in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBreedStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryBreedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mirror of the `CHECK` constraints on the `breeds` table
fn check_constraints(breed: &Breed) -> StorageResult<()> {
    let violated = if breed.id <= 0 {
        Some("breeds_id_positive")
    } else if breed.species.is_empty() {
        Some("breeds_species_not_empty")
    } else if breed.pet_size.is_empty() {
        Some("breeds_pet_size_not_empty")
    } else if breed.name.is_empty() {
        Some("breeds_name_not_empty")
    } else if breed.average_male_adult_weight <= 0 {
        Some("breeds_male_weight_positive")
    } else if breed.average_female_adult_weight <= 0 {
        Some("breeds_female_weight_positive")
    } else {
        None
    };

    match violated {
        Some(constraint) => Err(StorageError::CheckViolation {
            constraint: Some(constraint.to_string()),
            table: Some("breeds".to_string()),
            message: format!("new row for relation \"breeds\" violates check constraint \"{constraint}\""),
        }),
        None => Ok(()),
    }
}

#[async_trait]
impl BreedStore for InMemoryBreedStore {
    async fn fetch(&self, query: &ListQuery) -> StorageResult<Vec<Breed>> {
        let table = self.table.read().await;
        Ok(query.page(table.rows.values()))
    }

    async fn fetch_by_id(&self, id: BreedId) -> StorageResult<Option<Breed>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, request: &BreedCreateDBRequest) -> StorageResult<Breed> {
        let mut table = self.table.write().await;
        // Like a SERIAL column, a rejected row still consumes its id
        let breed = Breed {
            id: table.allocate_id()?,
            species: request.species.clone(),
            pet_size: request.pet_size.clone(),
            name: request.name.clone(),
            average_male_adult_weight: request.average_male_adult_weight,
            average_female_adult_weight: request.average_female_adult_weight,
        };
        check_constraints(&breed)?;

        table.rows.insert(breed.id, breed.clone());
        Ok(breed)
    }

    async fn update(&self, id: BreedId, changes: &[FieldChange]) -> StorageResult<Option<Breed>> {
        let mut table = self.table.write().await;
        let Some(current) = table.rows.get(&id) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        for change in changes {
            change.apply(&mut updated);
        }
        check_constraints(&updated)?;

        table.rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: BreedId) -> StorageResult<u64> {
        let mut table = self.table.write().await;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }

    async fn begin_import(&self) -> StorageResult<Box<dyn ImportBatch>> {
        let guard = Arc::clone(&self.table).write_owned().await;
        let staged = Table::clone(&guard);
        Ok(Box::new(InMemoryImportBatch { guard, staged }))
    }
}

/// Import batch that holds the table's write lock and stages its writes on a copy
struct InMemoryImportBatch {
    guard: OwnedRwLockWriteGuard<Table>,
    staged: Table,
}

#[async_trait]
impl ImportBatch for InMemoryImportBatch {
    async fn upsert(&mut self, breed: &Breed) -> StorageResult<()> {
        match self.staged.rows.entry(breed.id) {
            Entry::Occupied(mut entry) => {
                let updated = Breed {
                    species: breed.species.clone(),
                    pet_size: breed.pet_size.clone(),
                    average_male_adult_weight: breed.average_male_adult_weight,
                    average_female_adult_weight: breed.average_female_adult_weight,
                    ..entry.get().clone()
                };
                check_constraints(&updated)?;
                entry.insert(updated);
            }
            Entry::Vacant(entry) => {
                check_constraints(breed)?;
                entry.insert(breed.clone());
            }
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let InMemoryImportBatch { mut guard, mut staged } = *self;
        if let Some(max_id) = staged.rows.keys().next_back().copied() {
            staged.last_id = staged.last_id.max(max_id);
        }
        *guard = staged;
        Ok(())
    }
}
