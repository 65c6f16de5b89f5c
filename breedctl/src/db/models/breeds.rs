//! Database models for the breed catalogue.

use crate::db::errors::DbError;
use crate::types::BreedId;
use serde::{Deserialize, Serialize};

/// A catalogue row. Import sources supply the id; everywhere else it comes from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Breed {
    pub id: BreedId,
    pub species: String,
    pub pet_size: String,
    pub name: String,
    pub average_male_adult_weight: i32,
    pub average_female_adult_weight: i32,
}

/// Database request for creating a new breed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedCreateDBRequest {
    pub species: String,
    pub pet_size: String,
    pub name: String,
    pub average_male_adult_weight: i32,
    pub average_female_adult_weight: i32,
}

impl BreedCreateDBRequest {
    /// Check every field in column order, reporting the first one that is unusable
    pub fn validate(&self) -> Result<(), DbError> {
        require_text("species", &self.species)?;
        require_text("pet_size", &self.pet_size)?;
        require_text("name", &self.name)?;
        require_positive("average_male_adult_weight", self.average_male_adult_weight)?;
        require_positive("average_female_adult_weight", self.average_female_adult_weight)?;
        Ok(())
    }
}

// Same rule as the update path and the `<> ''` column checks: only the empty string is blank
fn require_text(field: &'static str, value: &str) -> Result<(), DbError> {
    if value.is_empty() {
        return Err(DbError::Validation {
            field,
            reason: "must not be empty",
        });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: i32) -> Result<(), DbError> {
    if value <= 0 {
        return Err(DbError::Validation {
            field,
            reason: "must be a positive integer",
        });
    }
    Ok(())
}

/// Database request for a partial update.
///
/// A field counts as supplied only when it is present and meaningful: an empty string or a
/// non-positive weight is treated the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedUpdateDBRequest {
    pub species: Option<String>,
    pub pet_size: Option<String>,
    pub name: Option<String>,
    pub average_male_adult_weight: Option<i32>,
    pub average_female_adult_weight: Option<i32>,
}

impl BreedUpdateDBRequest {
    /// The supplied fields, in column order
    pub fn changes(&self) -> Vec<FieldChange> {
        let text = |value: &Option<String>| value.as_deref().filter(|v| !v.is_empty()).map(str::to_string);
        let weight = |value: Option<i32>| value.filter(|v| *v > 0);

        [
            text(&self.species).map(FieldChange::Species),
            text(&self.pet_size).map(FieldChange::PetSize),
            text(&self.name).map(FieldChange::Name),
            weight(self.average_male_adult_weight).map(FieldChange::AverageMaleAdultWeight),
            weight(self.average_female_adult_weight).map(FieldChange::AverageFemaleAdultWeight),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// One column assignment of a partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Species(String),
    PetSize(String),
    Name(String),
    AverageMaleAdultWeight(i32),
    AverageFemaleAdultWeight(i32),
}

impl FieldChange {
    pub fn column(&self) -> &'static str {
        match self {
            FieldChange::Species(_) => "species",
            FieldChange::PetSize(_) => "pet_size",
            FieldChange::Name(_) => "name",
            FieldChange::AverageMaleAdultWeight(_) => "average_male_adult_weight",
            FieldChange::AverageFemaleAdultWeight(_) => "average_female_adult_weight",
        }
    }

    pub fn apply(&self, breed: &mut Breed) {
        match self {
            FieldChange::Species(value) => breed.species = value.clone(),
            FieldChange::PetSize(value) => breed.pet_size = value.clone(),
            FieldChange::Name(value) => breed.name = value.clone(),
            FieldChange::AverageMaleAdultWeight(value) => breed.average_male_adult_weight = *value,
            FieldChange::AverageFemaleAdultWeight(value) => breed.average_female_adult_weight = *value,
        }
    }
}

/// Outcome of a committed bulk import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
}
