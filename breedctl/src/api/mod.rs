//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//!
//! # Routes
//!
//! - `GET /breeds`, `POST /breeds`
//! - `GET /breeds/{id}`, `PUT /breeds/{id}`, `DELETE /breeds/{id}`
//! - `POST /import-breeds`
//! - `GET /health`
//!
//! All endpoints are documented with `utoipa`; the rendered reference is served at `/docs`.

pub mod handlers;
pub mod models;
