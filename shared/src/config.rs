use thiserror::Error;
use url::Url;

pub const LOCAL_API_URL: &str = "http://localhost:5000";
pub const PRODUCTION_API_URL: &str = "http://facemap.railway.internal:5000";
pub const ANALYZE_PATH: &str = "analyze-face";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API URL {value:?}: {source}")]
    Parse {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API URL must use http or https: {0}")]
    Scheme(String),
}

/// Candidate base URLs, highest priority first.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Injected at container start (`window.ENV.API_URL`).
    pub runtime: Option<String>,
    /// Baked in at build time (`FACEMAP_API_URL`).
    pub build_time: Option<String>,
    pub production: bool,
}

/// Where the analysis service lives. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|source| ConfigError::Parse {
            value: trimmed.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Scheme(trimmed.to_string()));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Picks the runtime value, then the build-time value, then the
    /// production or local default. Blank and unparsable candidates are
    /// skipped.
    pub fn resolve(sources: &ConfigSources) -> Self {
        let candidates = [
            ("runtime configuration", sources.runtime.as_deref()),
            ("build environment", sources.build_time.as_deref()),
        ];

        for (origin, value) in candidates {
            let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };
            match Self::new(value) {
                Ok(config) => {
                    log::info!("Using API URL from {}: {}", origin, config.base_url);
                    return config;
                }
                Err(e) => log::warn!("Ignoring API URL from {}: {}", origin, e),
            }
        }

        let fallback = if sources.production {
            PRODUCTION_API_URL
        } else {
            LOCAL_API_URL
        };
        log::info!("Using default API URL: {}", fallback);
        Self {
            base_url: fallback.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn analyze_url(&self) -> String {
        format!("{}/{}", self.base_url, ANALYZE_PATH)
    }
}
