//! Analytics API endpoint configuration.
//!
//! The two variables are injected at build time (`CUBEJS_API_URL`,
//! `CUBEJS_API_TOKEN`); a missing URL falls back to the current origin so
//! a reverse-proxied deployment needs no configuration at all.

/// Connection settings for the analytics query API.
#[derive(Debug, Clone)]
pub struct CubeConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl CubeConfig {
    pub fn from_env() -> Self {
        let base_url = option_env!("CUBEJS_API_URL")
            .map(str::to_string)
            .unwrap_or_else(origin_base);
        let token = option_env!("CUBEJS_API_TOKEN").map(str::to_string);
        Self { base_url, token }
    }
}

#[cfg(target_arch = "wasm32")]
fn origin_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:4000", protocol, hostname)
}

#[cfg(not(target_arch = "wasm32"))]
fn origin_base() -> String {
    "http://127.0.0.1:4000".to_string()
}
