//! Sources of records for bulk import.
//!
//! Sources only turn external data into [`Breed`](crate::db::models::breeds::Breed) values;
//! semantic checks happen when the records are written, inside the import batch.

pub mod csv;

pub use csv::{SourceError, read_breeds, read_breeds_file};
