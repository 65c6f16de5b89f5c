//! API request/response models for breeds.

use super::pagination::Pagination;
use crate::db::models::breeds::{Breed, BreedCreateDBRequest, BreedUpdateDBRequest};
use crate::db::query::BreedFilter;
use crate::types::BreedId;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing breeds
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListBreedsQuery {
    /// Exact species to match, e.g. "dog"
    pub species: Option<String>,

    /// Exact size label to match, e.g. "small"
    pub pet_size: Option<String>,

    /// Keep breeds where either average weight is at least this value
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    pub weight_min: Option<i32>,

    /// Keep breeds where either average weight is at most this value
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    pub weight_max: Option<i32>,

    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

impl ListBreedsQuery {
    pub fn to_filter(&self) -> BreedFilter {
        let (limit, offset) = self.pagination.params();
        BreedFilter {
            species: self.species.clone(),
            pet_size: self.pet_size.clone(),
            weight_min: self.weight_min,
            weight_max: self.weight_max,
            limit,
            offset,
        }
    }
}

/// Request body for creating a breed. Missing fields are reported as validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct BreedCreate {
    #[schema(example = "dog")]
    pub species: String,
    #[schema(example = "medium")]
    pub pet_size: String,
    #[schema(example = "Collie")]
    pub name: String,
    #[schema(example = 20)]
    pub average_male_adult_weight: i32,
    #[schema(example = 18)]
    pub average_female_adult_weight: i32,
}

impl From<BreedCreate> for BreedCreateDBRequest {
    fn from(create: BreedCreate) -> Self {
        Self {
            species: create.species,
            pet_size: create.pet_size,
            name: create.name,
            average_male_adult_weight: create.average_male_adult_weight,
            average_female_adult_weight: create.average_female_adult_weight,
        }
    }
}

/// Request body for updating a breed. All fields are optional; empty strings and
/// non-positive weights are treated as not provided.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BreedUpdate {
    pub species: Option<String>,
    pub pet_size: Option<String>,
    #[schema(example = "Rough Collie")]
    pub name: Option<String>,
    pub average_male_adult_weight: Option<i32>,
    pub average_female_adult_weight: Option<i32>,
}

impl From<BreedUpdate> for BreedUpdateDBRequest {
    fn from(update: BreedUpdate) -> Self {
        Self {
            species: update.species,
            pet_size: update.pet_size,
            name: update.name,
            average_male_adult_weight: update.average_male_adult_weight,
            average_female_adult_weight: update.average_female_adult_weight,
        }
    }
}

/// A breed as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BreedResponse {
    pub id: BreedId,
    pub species: String,
    pub pet_size: String,
    pub name: String,
    pub average_male_adult_weight: i32,
    pub average_female_adult_weight: i32,
}

impl From<Breed> for BreedResponse {
    fn from(breed: Breed) -> Self {
        Self {
            id: breed.id,
            species: breed.species,
            pet_size: breed.pet_size,
            name: breed.name,
            average_male_adult_weight: breed.average_male_adult_weight,
            average_female_adult_weight: breed.average_female_adult_weight,
        }
    }
}

/// Result of a committed bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    /// Number of records applied
    pub imported: usize,
    /// Where the records came from: "request body" or the configured file path
    pub source: String,
}
