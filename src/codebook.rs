use std::collections::HashMap;

use crate::config::ConfigError;

/// One long/short substitution pair for a [`Codebook`].
#[derive(Debug, Clone)]
pub struct Mapping {
    long: String,
    short: String,
}

impl Mapping {
    pub fn new(long: impl Into<String>, short: impl Into<String>) -> Self {
        Mapping {
            long: long.into(),
            short: short.into(),
        }
    }
}

/// Exact-match shortening of system and resource names before encryption.
/// For example, `MEDICATION_STATEMENT` can be configured to shorten to `S`.
/// Values without a registered mapping pass through unchanged in both
/// directions.
#[derive(Debug, Clone, Default)]
pub struct Codebook {
    long_to_short: HashMap<String, String>,
    short_to_long: HashMap<String, String>,
}

impl Codebook {
    pub fn empty() -> Self {
        Codebook::default()
    }

    /// Build a codebook from substitution pairs. A duplicate long or short
    /// value would make encoding irreversible, so construction refuses it
    /// before any encode or decode can happen.
    pub fn new(mappings: impl IntoIterator<Item = Mapping>) -> Result<Self, ConfigError> {
        let mut long_to_short = HashMap::new();
        let mut short_to_long = HashMap::new();
        for mapping in mappings {
            if long_to_short.contains_key(&mapping.long) {
                return Err(ConfigError::DuplicateLongValue(mapping.long));
            }
            if short_to_long.contains_key(&mapping.short) {
                return Err(ConfigError::DuplicateShortValue(mapping.short));
            }
            long_to_short.insert(mapping.long.clone(), mapping.short.clone());
            short_to_long.insert(mapping.short, mapping.long);
        }
        Ok(Codebook {
            long_to_short,
            short_to_long,
        })
    }

    pub fn shorten<'a>(&'a self, value: &'a str) -> &'a str {
        self.long_to_short
            .get(value)
            .map(String::as_str)
            .unwrap_or(value)
    }

    pub fn restore<'a>(&'a self, value: &'a str) -> &'a str {
        self.short_to_long
            .get(value)
            .map(String::as_str)
            .unwrap_or(value)
    }
}
