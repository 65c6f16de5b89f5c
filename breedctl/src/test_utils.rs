//! Shared fixtures for the in-crate test suites.

use crate::config::{Config, DatabaseConfig, StorageBackend};
use crate::db::handlers::Breeds;
use crate::db::store::in_memory::InMemoryBreedStore;
use crate::import::read_breeds;
use axum_test::TestServer;
use std::sync::Arc;

/// The sample catalogue shipped in `data/breeds.csv`: six dogs (ids 1-6) and four cats (ids 7-10).
pub const SAMPLE_CSV: &str = include_str!("../data/breeds.csv");

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn create_test_server(store: InMemoryBreedStore) -> TestServer {
    create_test_server_with_config(store, create_test_config())
}

pub fn create_test_server_with_config(store: InMemoryBreedStore, config: Config) -> TestServer {
    crate::Application::new_with_store(config, Arc::new(store)).into_test_server()
}

/// Load the sample catalogue into `store`.
pub async fn seed_breeds(store: &InMemoryBreedStore) {
    let records = read_breeds(SAMPLE_CSV).expect("sample CSV should parse");
    Breeds::new(store)
        .import(&records)
        .await
        .expect("sample CSV should import");
}
