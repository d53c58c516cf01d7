//! Listing page-size configuration.

use rescat_core::query::{DEFAULT_PER_PAGE, MAX_PER_PAGE, Pagination};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

const fn max_per_page() -> u32 {
    MAX_PER_PAGE
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Page size when the request gives none.
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,

    /// Largest page size a request may ask for.
    #[serde(default = "max_per_page")]
    pub max_per_page: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: max_per_page(),
        }
    }
}

impl PaginationConfig {
    /// Resolve raw request values against these limits.
    #[must_use]
    pub fn resolve(&self, page: Option<i64>, per_page: Option<i64>) -> Pagination {
        Pagination::resolve(page, per_page, self.default_per_page, self.max_per_page)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero size or a default above
    /// the maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_per_page == 0 {
            return Err(invalid("pagination.max_per_page", "must be at least 1"));
        }
        if self.default_per_page == 0 {
            return Err(invalid("pagination.default_per_page", "must be at least 1"));
        }
        if self.default_per_page > self.max_per_page {
            return Err(invalid(
                "pagination.default_per_page",
                &format!("must not exceed max_per_page ({})", self.max_per_page),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PaginationConfig::default();
        assert_eq!(config.default_per_page, 10);
        assert_eq!(config.max_per_page, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_above_max_is_rejected() {
        let config = PaginationConfig {
            default_per_page: 50,
            max_per_page: 20,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "pagination.default_per_page"));
    }

    #[test]
    fn zero_max_is_rejected() {
        let config = PaginationConfig {
            default_per_page: 0,
            max_per_page: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn resolve_uses_configured_limits() {
        let config = PaginationConfig {
            default_per_page: 5,
            max_per_page: 20,
        };
        assert_eq!(config.resolve(None, None).per_page, 5);
        assert_eq!(config.resolve(Some(2), Some(500)).per_page, 20);
    }
}
