//! Persistence for the breed catalogue.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (api::handlers - HTTP)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │ Repository  │  (db::handlers - validation, not-found mapping, import batching)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │    Store    │  (db::store - PostgreSQL or in-memory)
//! └─────────────┘
//! ```
//!
//! - [`query`]: filter criteria and the `SELECT` they compile to
//! - [`models`]: row types and mutation requests
//! - [`errors`]: storage and repository errors

pub mod errors;
pub mod handlers;
pub mod models;
pub mod query;
pub mod store;
