//! cielo24 API version definitions.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// cielo24 API version, sent as the `v` query parameter on every call.
///
/// The API is versioned by a plain positive integer. Version `1` is the
/// current (and default) version.
///
/// # Example
///
/// ```rust
/// use cielo24::ApiVersion;
///
/// let version: ApiVersion = "1".parse().unwrap();
/// assert_eq!(version, ApiVersion::default());
/// assert_eq!(version.to_string(), "1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiVersion(u32);

impl ApiVersion {
    /// The version used when none is configured.
    pub const V1: Self = Self(1);

    /// Creates a version from its number.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] for version `0`.
    pub fn new(version: u32) -> Result<Self, ConfigError> {
        if version == 0 {
            return Err(ConfigError::InvalidApiVersion {
                version: version.to_string(),
            });
        }
        Ok(Self(version))
    }

    /// Returns the version number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::V1
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let number = trimmed
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidApiVersion {
                version: s.to_string(),
            })?;
        Self::new(number).map_err(|_| ConfigError::InvalidApiVersion {
            version: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_version_one() {
        assert_eq!(ApiVersion::default(), ApiVersion::V1);
        assert_eq!(ApiVersion::default().number(), 1);
    }

    #[test]
    fn test_parse_accepts_plain_and_prefixed_numbers() {
        assert_eq!("1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!("v2".parse::<ApiVersion>().unwrap().number(), 2);
        assert_eq!(" 3 ".parse::<ApiVersion>().unwrap().number(), 3);
    }

    #[test]
    fn test_parse_rejects_invalid_versions() {
        assert!(matches!(
            "0".parse::<ApiVersion>(),
            Err(ConfigError::InvalidApiVersion { .. })
        ));
        assert!("2024-10".parse::<ApiVersion>().is_err());
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_display_renders_bare_number() {
        assert_eq!(ApiVersion::new(4).unwrap().to_string(), "4");
    }
}
