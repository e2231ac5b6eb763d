use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Result};

/// Connection settings for the hosted CMS query API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Route queries through the CDN edge instead of the live API.
    pub use_cdn: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: false,
        }
    }
}

impl ContentConfig {
    /// Settings for a project with the default dataset and API version.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// Read settings from `VITRINE_CMS_*` environment variables. The
    /// project id is required; the rest fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let project_id = std::env::var("VITRINE_CMS_PROJECT_ID").map_err(|_| {
            ContentError::Config(
                "VITRINE_CMS_PROJECT_ID is not set".to_string(),
            )
        })?;
        let mut config = Self::new(project_id);
        if let Ok(dataset) = std::env::var("VITRINE_CMS_DATASET") {
            config.dataset = dataset;
        }
        if let Ok(version) = std::env::var("VITRINE_CMS_API_VERSION") {
            config.api_version = version;
        }
        if let Ok(cdn) = std::env::var("VITRINE_CMS_USE_CDN") {
            config.use_cdn = matches!(cdn.as_str(), "1" | "true" | "yes");
        }
        Ok(config)
    }

    /// Full endpoint for the query API of this project and dataset.
    pub fn query_endpoint(&self) -> String {
        let host = if self.use_cdn {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        format!(
            "https://{}.{}/v{}/data/query/{}",
            self.project_id, host, self.api_version, self.dataset
        )
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(ContentError::Config(
                "project id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
