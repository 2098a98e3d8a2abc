//! Server settings read from the environment.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Bind address and pairing RNG seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Fixed seed for reproducible pairings; entropy when unset.
    pub pairing_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            pairing_seed: None,
        }
    }
}

impl Settings {
    /// Read `HOST`, `PORT` and `PAIRING_SEED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: v,
            })?,
            None => defaults.port,
        };
        let pairing_seed = match lookup("PAIRING_SEED") {
            Some(v) => Some(v.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PAIRING_SEED",
                value: v,
            })?),
            None => None,
        };
        Ok(Self {
            host,
            port,
            pairing_seed,
        })
    }

    /// RNG used to shuffle brackets.
    pub fn pairing_rng(&self) -> StdRng {
        match self.pairing_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Settings::from_lookup(lookup(&[])).unwrap(), Settings::default());
    }

    #[test]
    fn reads_overrides() {
        let s = Settings::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("PAIRING_SEED", "42"),
        ]))
        .unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.port, 9000);
        assert_eq!(s.pairing_seed, Some(42));
    }

    #[test]
    fn rejects_bad_port() {
        assert_eq!(
            Settings::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(ConfigError::InvalidValue {
                name: "PORT",
                value: "eighty".to_string()
            })
        );
    }
}
