//! Listing queries for the breed catalogue.
//!
//! A [`BreedFilter`] holds the optional criteria a caller supplied. [`ListQuery::from_filter`]
//! lowers it into an ordered list of [`Predicate`]s plus pagination, which is then either
//! rendered into parameterised SQL with [`ListQuery::build`] or evaluated against rows in memory
//! with [`ListQuery::page`]. Both backends therefore share one definition of what a filter means.
//!
//! Predicates are always emitted in the same order (species, pet size, weight floor, weight
//! ceiling) no matter how the filter was assembled, and every value is sent as a bind parameter.
//! The weight bounds are deliberately loose: a breed passes the floor if *either* average weight
//! reaches it, and passes the ceiling if *either* average weight stays under it.

use crate::db::models::breeds::Breed;
use sqlx::{Postgres, QueryBuilder};

/// Page size applied when the caller does not ask for one
pub const DEFAULT_LIMIT: i64 = 50;

pub(crate) const BREED_COLUMNS: &str =
    "id, species, pet_size, name, average_male_adult_weight, average_female_adult_weight";

/// Criteria for listing breeds. Empty strings and absent values mean "no constraint".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedFilter {
    pub species: Option<String>,
    pub pet_size: Option<String>,
    pub weight_min: Option<i32>,
    pub weight_max: Option<i32>,
    /// Non-positive means unlimited
    pub limit: i64,
    /// Only honoured when a limit applies
    pub offset: i64,
}

impl Default for BreedFilter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}

impl BreedFilter {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            species: None,
            pet_size: None,
            weight_min: None,
            weight_max: None,
            limit,
            offset,
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn with_pet_size(mut self, pet_size: impl Into<String>) -> Self {
        self.pet_size = Some(pet_size.into());
        self
    }

    pub fn with_weight_min(mut self, weight: i32) -> Self {
        self.weight_min = Some(weight);
        self
    }

    pub fn with_weight_max(mut self, weight: i32) -> Self {
        self.weight_max = Some(weight);
        self
    }
}

/// A single WHERE clause condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    SpeciesEquals(String),
    PetSizeEquals(String),
    /// Either average weight is at least the bound
    WeightAtLeast(i32),
    /// Either average weight is at most the bound
    WeightAtMost(i32),
}

/// A value bound to a query placeholder, in placeholder order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Int(i32),
    BigInt(i64),
}

impl Predicate {
    fn push_sql(&self, query: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Predicate::SpeciesEquals(species) => {
                query.push(" AND species = ");
                query.push_bind(species.clone());
            }
            Predicate::PetSizeEquals(pet_size) => {
                query.push(" AND pet_size = ");
                query.push_bind(pet_size.clone());
            }
            Predicate::WeightAtLeast(weight) => {
                query.push(" AND (average_male_adult_weight >= ");
                query.push_bind(*weight);
                query.push(" OR average_female_adult_weight >= ");
                query.push_bind(*weight);
                query.push(")");
            }
            Predicate::WeightAtMost(weight) => {
                query.push(" AND (average_male_adult_weight <= ");
                query.push_bind(*weight);
                query.push(" OR average_female_adult_weight <= ");
                query.push_bind(*weight);
                query.push(")");
            }
        }
    }

    fn push_binds(&self, values: &mut Vec<BindValue>) {
        match self {
            Predicate::SpeciesEquals(text) | Predicate::PetSizeEquals(text) => values.push(BindValue::Text(text.clone())),
            // The bound appears once per weight column
            Predicate::WeightAtLeast(weight) | Predicate::WeightAtMost(weight) => {
                values.push(BindValue::Int(*weight));
                values.push(BindValue::Int(*weight));
            }
        }
    }

    pub fn matches(&self, breed: &Breed) -> bool {
        match self {
            Predicate::SpeciesEquals(species) => breed.species == *species,
            Predicate::PetSizeEquals(pet_size) => breed.pet_size == *pet_size,
            Predicate::WeightAtLeast(weight) => {
                breed.average_male_adult_weight >= *weight || breed.average_female_adult_weight >= *weight
            }
            Predicate::WeightAtMost(weight) => {
                breed.average_male_adult_weight <= *weight || breed.average_female_adult_weight <= *weight
            }
        }
    }
}

/// A fully resolved listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    predicates: Vec<Predicate>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl ListQuery {
    pub fn from_filter(filter: &BreedFilter) -> Self {
        let text = |value: &Option<String>| value.as_deref().filter(|v| !v.is_empty()).map(str::to_string);

        let predicates = [
            text(&filter.species).map(Predicate::SpeciesEquals),
            text(&filter.pet_size).map(Predicate::PetSizeEquals),
            filter.weight_min.map(Predicate::WeightAtLeast),
            filter.weight_max.map(Predicate::WeightAtMost),
        ]
        .into_iter()
        .flatten()
        .collect();

        let limit = (filter.limit > 0).then_some(filter.limit);
        let offset = limit.and(Some(filter.offset)).filter(|offset| *offset > 0);

        Self {
            predicates,
            limit,
            offset,
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Render the query as SQL with positional bind parameters
    pub fn build(&self) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new(format!("SELECT {BREED_COLUMNS} FROM breeds WHERE 1=1"));

        for predicate in &self.predicates {
            predicate.push_sql(&mut query);
        }

        query.push(" ORDER BY name ASC, id ASC");

        if let Some(limit) = self.limit {
            query.push(" LIMIT ");
            query.push_bind(limit);

            if let Some(offset) = self.offset {
                query.push(" OFFSET ");
                query.push_bind(offset);
            }
        }

        query
    }

    /// The values [`build`](Self::build) binds, in placeholder order
    pub fn bind_values(&self) -> Vec<BindValue> {
        let mut values = Vec::new();
        for predicate in &self.predicates {
            predicate.push_binds(&mut values);
        }
        if let Some(limit) = self.limit {
            values.push(BindValue::BigInt(limit));
            if let Some(offset) = self.offset {
                values.push(BindValue::BigInt(offset));
            }
        }
        values
    }

    pub fn matches(&self, breed: &Breed) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(breed))
    }

    /// Filter, order and paginate rows held in memory the same way the SQL form does
    pub fn page<'a>(&self, breeds: impl IntoIterator<Item = &'a Breed>) -> Vec<Breed> {
        let mut matched: Vec<&Breed> = breeds.into_iter().filter(|breed| self.matches(breed)).collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let skip = self.offset.map_or(0, |offset| usize::try_from(offset).unwrap_or(usize::MAX));
        let take = self.limit.map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        matched.into_iter().skip(skip).take(take).cloned().collect()
    }
}
