//! Shared fixtures for the integration tests

#![allow(dead_code)]

use cabinet::adapters::storage::{KeyValueStore, MemoryStore};
use cabinet::config::{CabinetConfig, StorageBackend, StorageConfig};
use cabinet::core::navigation::Navigator;
use cabinet::core::AppContext;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub fn config(base_url: &str) -> CabinetConfig {
    let mut config = CabinetConfig {
        storage: StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        },
        ..CabinetConfig::default()
    };
    config.api.base_url = base_url.to_string();
    config
}

pub fn context(base_url: &str) -> (AppContext, Arc<MemoryStore>) {
    context_with(config(base_url))
}

pub fn context_with(config: CabinetConfig) -> (AppContext, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let context = AppContext::from_parts(config, store.clone()).unwrap();
    (context, store)
}

pub fn user_json(role: &str) -> Value {
    json!({
        "id": 1,
        "email": "staff@x.com",
        "nom": "Durand",
        "prenom": "Paul",
        "role": role
    })
}

pub fn auth_body(token: &str, refresh: &str, role: &str) -> String {
    json!({
        "token": token,
        "refreshToken": refresh,
        "user": user_json(role)
    })
    .to_string()
}

pub fn empty_page() -> String {
    json!({
        "content": [],
        "totalElements": 0,
        "totalPages": 0,
        "number": 0,
        "size": 20
    })
    .to_string()
}

/// Writes a session as if a previous run had signed in
pub fn seed_session(store: &MemoryStore, token: &str, role: &str) {
    store.set("auth_token", token).unwrap();
    store.set("refresh_token", "r-seed").unwrap();
    store.set("current_user", &user_json(role).to_string()).unwrap();
}

/// Waits until the navigator shows `expected`
pub async fn wait_for_location(navigator: &Navigator, expected: &str) {
    let mut location = navigator.subscribe();
    let reached = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if location.borrow_and_update().as_str() == expected {
                return true;
            }
            if location.changed().await.is_err() {
                return false;
            }
        }
    })
    .await;
    assert_eq!(
        reached,
        Ok(true),
        "navigator never reached {expected}, still at {}",
        navigator.current_location()
    );
}
