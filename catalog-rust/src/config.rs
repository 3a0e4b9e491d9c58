/// otaku-catalog configuration
/// Reads environment variables, falls back to defaults

use tracing::warn;

/// B2 credentials. Present only when the whole set is configured.
#[derive(Debug, Clone)]
pub struct B2Config {
    pub key_id: String,
    pub application_key: String,
    pub bucket_name: String,
    /// Skips bucket listing when set
    pub bucket_id: Option<String>,
    /// Authorize endpoint host, overridable for tests
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Listen port
    pub port: u16,
    /// Listen address
    pub host: String,
    /// TMDB API key, checked per request
    pub tmdb_api_key: Option<String>,
    pub tmdb_api_base: String,
    pub tmdb_image_base: String,
    /// Timeout for every TMDB and B2 call
    pub upstream_timeout_ms: u64,
    /// `None` disables the blob tier entirely
    pub b2: Option<B2Config>,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            port: get("CATALOG_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            host: get("CATALOG_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            tmdb_api_key: get("TMDB_API_KEY"),
            tmdb_api_base: get("TMDB_API_BASE")
                .unwrap_or_else(|| "https://api.themoviedb.org/3".into()),
            tmdb_image_base: get("TMDB_IMAGE_BASE")
                .unwrap_or_else(|| "https://image.tmdb.org/t/p".into()),
            upstream_timeout_ms: get("UPSTREAM_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            b2: b2_from_lookup(&get),
        }
    }

    pub fn blob_enabled(&self) -> bool {
        self.b2.is_some()
    }
}

fn b2_from_lookup(get: &impl Fn(&str) -> Option<String>) -> Option<B2Config> {
    let key_id = get("B2_KEY_ID");
    let application_key = get("B2_APPLICATION_KEY");
    let bucket_name = get("B2_BUCKET_NAME");

    match (key_id, application_key, bucket_name) {
        (Some(key_id), Some(application_key), Some(bucket_name)) => Some(B2Config {
            key_id,
            application_key,
            bucket_name,
            bucket_id: get("B2_BUCKET_ID"),
            api_base: get("B2_API_BASE").unwrap_or_else(|| "https://api.backblazeb2.com".into()),
        }),
        (None, None, None) => None,
        _ => {
            // partial config counts as disabled
            warn!("[CONFIG] B2 configuration incomplete, blob cache disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> CatalogConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CatalogConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = config_with(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.tmdb_api_base, "https://api.themoviedb.org/3");
        assert!(config.tmdb_api_key.is_none());
        assert!(!config.blob_enabled());
    }

    #[test]
    fn full_b2_set_enables_blob_store() {
        let config = config_with(&[
            ("B2_KEY_ID", "kid"),
            ("B2_APPLICATION_KEY", "secret"),
            ("B2_BUCKET_NAME", "otaku-images"),
        ]);
        let b2 = config.b2.expect("b2 enabled");
        assert_eq!(b2.bucket_name, "otaku-images");
        assert!(b2.bucket_id.is_none());
        assert_eq!(b2.api_base, "https://api.backblazeb2.com");
    }

    #[test]
    fn partial_b2_set_is_disabled() {
        let config = config_with(&[("B2_KEY_ID", "kid"), ("B2_BUCKET_NAME", "otaku-images")]);
        assert!(!config.blob_enabled());

        let blank = config_with(&[
            ("B2_KEY_ID", "kid"),
            ("B2_APPLICATION_KEY", "  "),
            ("B2_BUCKET_NAME", "otaku-images"),
        ]);
        assert!(!blank.blob_enabled());
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = config_with(&[("CATALOG_PORT", "not-a-port"), ("UPSTREAM_TIMEOUT_MS", "2500")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream_timeout_ms, 2500);
    }
}
