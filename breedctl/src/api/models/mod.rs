//! API request and response data models.
//!
//! API models are kept separate from the database models in [`crate::db::models`] so the wire
//! format can evolve independently of storage. All of them are annotated with `utoipa` for the
//! generated documentation.
//!
//! - [`breeds`]: breed payloads, list query parameters and the import result
//! - [`pagination`]: shared `limit`/`offset` query parameters

pub mod breeds;
pub mod pagination;
