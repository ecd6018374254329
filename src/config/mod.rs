//! Configuration loading and management

use crate::core::error::{BoardError, BoardResult, ConfigError};
use crate::core::query::{DEFAULT_LIMIT, MAX_LIMIT, SortSpec};
use crate::entities::job::JOB_CATEGORIES;
use serde::{Deserialize, Serialize};

/// Configuration for one listed entity kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Singular form (e.g., "job", "business")
    pub singular: String,

    /// Plural form used in routes (e.g., "jobs", "businesses")
    pub plural: String,

    /// Sort applied when a list request does not name one (e.g., "posted_at:desc")
    #[serde(default)]
    pub default_sort: Option<String>,

    /// Page size override for this kind
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl EntityConfig {
    pub fn default_sort(&self) -> SortSpec {
        self.default_sort
            .as_deref()
            .map(SortSpec::parse)
            .unwrap_or_default()
    }
}

/// Pagination limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// Demo data generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed for every randomly drawn demo attribute
    pub rng_seed: u64,
    pub jobs: usize,
    pub users: usize,
    pub businesses: usize,
    pub professionals: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            jobs: 40,
            users: 25,
            businesses: 8,
            professionals: 30,
        }
    }
}

/// Job posting wizard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Categories a new job may be filed under
    pub categories: Vec<String>,
    pub min_description_len: usize,
    pub max_description_len: usize,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            categories: JOB_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            min_description_len: 20,
            max_description_len: 5000,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Listed entity kinds
    pub entities: Vec<EntityConfig>,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub seed: SeedConfig,

    #[serde(default)]
    pub wizard: WizardConfig,
}

impl BoardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> BoardResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BoardError::Config(ConfigError::Io {
                path: path.to_string(),
                message: e.to_string(),
            })
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> BoardResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Find an entity kind by singular name
    pub fn entity(&self, singular: &str) -> BoardResult<&EntityConfig> {
        self.entities
            .iter()
            .find(|e| e.singular == singular)
            .ok_or_else(|| {
                ConfigError::UnknownEntity {
                    name: singular.to_string(),
                }
                .into()
            })
    }

    /// Find an entity kind by plural (route) name
    pub fn entity_by_plural(&self, plural: &str) -> Option<&EntityConfig> {
        self.entities.iter().find(|e| e.plural == plural)
    }

    /// Page size for a kind: its override, else the global default, capped by max_limit
    pub fn page_size(&self, singular: &str) -> usize {
        self.entities
            .iter()
            .find(|e| e.singular == singular)
            .and_then(|e| e.page_size)
            .unwrap_or(self.pagination.default_limit)
            .clamp(1, self.pagination.max_limit.max(1))
    }

    /// The marketplace's four listed kinds
    pub fn default_config() -> Self {
        let entity = |singular: &str, plural: &str, sort: Option<&str>| EntityConfig {
            singular: singular.to_string(),
            plural: plural.to_string(),
            default_sort: sort.map(String::from),
            page_size: None,
        };

        Self {
            entities: vec![
                entity("job", "jobs", Some("posted_at:desc")),
                entity("user", "users", Some("name:asc")),
                entity("business", "businesses", Some("name:asc")),
                entity("professional", "professionals", Some("rating:desc")),
            ],
            pagination: PaginationConfig::default(),
            seed: SeedConfig::default(),
            wizard: WizardConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default_config();

        assert_eq!(config.entities.len(), 4);
        assert_eq!(config.entity("job").unwrap().plural, "jobs");
        assert_eq!(
            config.entity("job").unwrap().default_sort(),
            SortSpec::desc("posted_at")
        );
        assert!(config.entity("invoice").is_err());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = BoardConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = BoardConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let yaml = r#"
entities:
  - singular: job
    plural: jobs
    page_size: 500
"#;
        let config = BoardConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.pagination, PaginationConfig::default());
        assert_eq!(config.seed.rng_seed, 42);
        assert_eq!(config.page_size("job"), MAX_LIMIT);
        assert_eq!(config.page_size("user"), DEFAULT_LIMIT);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = BoardConfig::from_yaml_str("entities: 12").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
