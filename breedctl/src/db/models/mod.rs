//! Database record structures matching the table schemas.

pub mod breeds;
