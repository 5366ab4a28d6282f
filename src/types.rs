//! Runtime configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Ranker configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankerConfig {
    /// Knowledge-base API endpoint (e.g. `https://en.wikipedia.org/w/api.php`).
    #[validate(length(min = 1))]
    pub kb_endpoint: String,

    /// Maximum hop count for category expansion during graph construction.
    /// At the default of 1 a graph contains only the direct parent
    /// categories of its seed topics.
    #[validate(range(min = 1))]
    pub path_length_threshold: u32,

    /// Fusion weight between content similarity (`alpha`) and category
    /// similarity (`1 - alpha`).
    #[validate(range(min = 0.0, max = 1.0))]
    pub alpha: f64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            kb_endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            path_length_threshold: 1,
            alpha: 0.5,
        }
    }
}

impl RankerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` first (non-fatal if `.env` is absent),
    /// then reads `KB_API_ENDPOINT`, `PATH_LENGTH_THRESHOLD` and `SIM_ALPHA`,
    /// falling back to defaults for any that are unset.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let kb_endpoint =
            std::env::var("KB_API_ENDPOINT").unwrap_or(defaults.kb_endpoint);

        let path_length_threshold = match std::env::var("PATH_LENGTH_THRESHOLD") {
            Ok(val) => val.parse::<u32>().map_err(|_| {
                crate::SensegraphError::Configuration(
                    "PATH_LENGTH_THRESHOLD must be a positive integer".to_string(),
                )
            })?,
            Err(_) => defaults.path_length_threshold,
        };

        let alpha = match std::env::var("SIM_ALPHA") {
            Ok(val) => val.parse::<f64>().map_err(|_| {
                crate::SensegraphError::Configuration(
                    "SIM_ALPHA must be a number".to_string(),
                )
            })?,
            Err(_) => defaults.alpha,
        };

        let config = Self {
            kb_endpoint,
            path_length_threshold,
            alpha,
        };

        config
            .validate()
            .map_err(|e| crate::SensegraphError::Configuration(e.to_string()))?;

        Ok(config)
    }
}
