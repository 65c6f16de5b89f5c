//! Repository implementations for catalogue access.
//!
//! - [`Breeds`]: create, read, list, update and delete breeds, plus all-or-nothing bulk import
//!
//! Repositories are cheap to construct and borrow the store for their lifetime:
//!
//! ```ignore
//! use breedctl::db::handlers::{Breeds, Repository};
//! use breedctl::db::query::BreedFilter;
//!
//! async fn example(state: &breedctl::AppState) -> breedctl::db::errors::Result<()> {
//!     let repo = Breeds::new(state.store.as_ref());
//!     let dogs = repo.list(&BreedFilter::default().with_species("dog")).await?;
//!     println!("{} dog breeds", dogs.len());
//!     Ok(())
//! }
//! ```

pub mod breeds;
pub mod repository;

pub use breeds::Breeds;
pub use repository::Repository;
