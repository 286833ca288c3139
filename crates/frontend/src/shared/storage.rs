//! Thin localStorage wrapper. Used for filter/preference persistence only;
//! no analytics data is ever cached here.
//!
//! Compiles to no-ops off wasm32 so store logic stays testable on the host.

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(_key: &str, _value: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove_item(_key: &str) {}
