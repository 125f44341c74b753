//! JSON values in LocalStorage
//!
//! Natively there is no persistent store: loads find nothing and writes
//! are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Load and deserialize the value stored under `key`.
///
/// Missing keys and undecodable values both yield `None`.
#[cfg(target_arch = "wasm32")]
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok()??;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt LocalStorage entry {}: {}", key, e);
            None
        }
    }
}

/// Serialize `value` and store it under `key`. Returns false if nothing was written.
#[cfg(target_arch = "wasm32")]
pub fn save<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(storage) = local_storage() else {
        return false;
    };
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json).is_ok(),
        Err(e) => {
            log::error!("Failed to serialize {}: {}", key, e);
            false
        }
    }
}

/// Remove `key` from storage
#[cfg(target_arch = "wasm32")]
pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save<T: Serialize>(_key: &str, _value: &T) -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(_key: &str) {
    // No-op for native
}
