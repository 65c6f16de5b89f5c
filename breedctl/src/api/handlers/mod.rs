//! HTTP request handlers for all API endpoints.
//!
//! Each handler deserializes its request, runs the operation through the
//! [`Breeds`](crate::db::handlers::Breeds) repository and serializes the result. Handlers return
//! [`crate::errors::Error`], which converts to the matching HTTP status code.
//!
//! - [`breeds`]: list, get, create, update and delete
//! - [`import`]: CSV bulk import
//! - [`health`]: liveness

pub mod breeds;
pub mod health;
pub mod import;
