//! Backend endpoint configuration.
//!
//! The base URL resolves in order:
//! 1. `GRANTHIKA_API_URL` in the process environment (native builds)
//! 2. `GRANTHIKA_API_URL` at compile time (the only option on WASM)
//! 3. the development default

/// Where the backend listens when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend base URL.
const API_URL_ENV: &str = "GRANTHIKA_API_URL";

/// Resolve the backend base URL, without a trailing slash.
pub fn api_base_url() -> String {
    #[cfg(not(target_arch = "wasm32"))]
    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            return normalize(&url);
        }
    }

    match option_env!("GRANTHIKA_API_URL") {
        Some(url) if !url.trim().is_empty() => normalize(url),
        _ => DEFAULT_API_URL.to_string(),
    }
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_whitespace_and_trailing_slashes() {
        assert_eq!(normalize(" http://api:9000/ "), "http://api:9000");
        assert_eq!(normalize("http://api:9000//"), "http://api:9000");
        assert_eq!(normalize("http://api:9000"), "http://api:9000");
    }

    #[test]
    fn default_has_no_trailing_slash() {
        assert!(!DEFAULT_API_URL.ends_with('/'));
    }
}
