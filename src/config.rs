//! Gameplay configuration
//!
//! Loaded once at startup. The plain format is whitespace separated
//! `option value` pairs:
//!
//! ```text
//! split_time 10
//! split_chance 0.1
//! lives_count 3
//! ```
//!
//! Files ending in `.json` are read as a JSON object with the same keys.
//! Options left out keep their defaults; unknown options are an error.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::sim::PowerupKind;

/// Power-up durations, drop chances and starting lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Effect durations (seconds)
    pub split_time: f32,
    pub glue_time: f32,
    pub shooter_time: f32,
    /// Chance (0-1) that a destroyed brick drops each power-up
    pub split_chance: f32,
    pub glue_chance: f32,
    pub shooter_chance: f32,
    /// Lives at the start of a game
    pub lives_count: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            split_time: 10.0,
            glue_time: 10.0,
            shooter_time: 10.0,
            split_chance: 0.1,
            glue_chance: 0.1,
            shooter_chance: 0.1,
            lives_count: 3,
        }
    }
}

impl GameConfig {
    /// Load from a file, picking the format from the extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&text)?
        } else {
            Self::parse(&text)?
        };

        config.log();
        Ok(config)
    }

    /// Parse the `option value` format
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut config = Self::default();
        let mut tokens = text.split_whitespace();

        while let Some(option) = tokens.next() {
            match option {
                "split_time" => config.split_time = value(option, tokens.next())?,
                "glue_time" => config.glue_time = value(option, tokens.next())?,
                "shooter_time" => config.shooter_time = value(option, tokens.next())?,
                "split_chance" => config.split_chance = value(option, tokens.next())?,
                "glue_chance" => config.glue_chance = value(option, tokens.next())?,
                "shooter_chance" => config.shooter_chance = value(option, tokens.next())?,
                "lives_count" => config.lives_count = value(option, tokens.next())?,
                _ => {
                    return Err(LoadError::UnknownOption {
                        option: option.to_string(),
                    });
                }
            }
        }

        Ok(config)
    }

    /// Parse the JSON format
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Effect duration of a power-up (seconds)
    pub fn duration(&self, kind: PowerupKind) -> f32 {
        match kind {
            PowerupKind::Split => self.split_time,
            PowerupKind::Glue => self.glue_time,
            PowerupKind::Shooter => self.shooter_time,
        }
    }

    /// Drop chance of a power-up per destroyed brick
    pub fn chance(&self, kind: PowerupKind) -> f32 {
        match kind {
            PowerupKind::Split => self.split_chance,
            PowerupKind::Glue => self.glue_chance,
            PowerupKind::Shooter => self.shooter_chance,
        }
    }

    fn log(&self) {
        log::info!("split_time: {}", self.split_time);
        log::info!("glue_time: {}", self.glue_time);
        log::info!("shooter_time: {}", self.shooter_time);
        log::info!("split_chance: {}", self.split_chance);
        log::info!("glue_chance: {}", self.glue_chance);
        log::info!("shooter_chance: {}", self.shooter_chance);
        log::info!("lives_count: {}", self.lives_count);
    }
}

fn value<T: FromStr>(option: &str, token: Option<&str>) -> Result<T, LoadError> {
    let token = token.ok_or_else(|| LoadError::MissingValue {
        option: option.to_string(),
    })?;
    token.parse().map_err(|_| LoadError::InvalidValue {
        option: option.to_string(),
        value: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_options() {
        let text = "split_time 4.5\nglue_time 6\nshooter_time 7\n\
                    split_chance 0.25 glue_chance 0.5\nshooter_chance 1\nlives_count 5\n";
        let config = GameConfig::parse(text).unwrap();
        assert_eq!(config.split_time, 4.5);
        assert_eq!(config.glue_time, 6.0);
        assert_eq!(config.shooter_time, 7.0);
        assert_eq!(config.chance(PowerupKind::Split), 0.25);
        assert_eq!(config.chance(PowerupKind::Glue), 0.5);
        assert_eq!(config.chance(PowerupKind::Shooter), 1.0);
        assert_eq!(config.lives_count, 5);
    }

    #[test]
    fn test_missing_options_keep_defaults() {
        let config = GameConfig::parse("lives_count 1").unwrap();
        assert_eq!(config.lives_count, 1);
        assert_eq!(config.glue_time, GameConfig::default().glue_time);
    }

    #[test]
    fn test_unknown_option_is_an_error() {
        let err = GameConfig::parse("split_time 3\nmusic_volume 0.5").unwrap_err();
        assert!(matches!(err, LoadError::UnknownOption { ref option } if option == "music_volume"));
        assert_eq!(err.to_string(), "invalid config option \"music_volume\"");
    }

    #[test]
    fn test_bad_and_missing_values() {
        assert!(matches!(
            GameConfig::parse("glue_time soon"),
            Err(LoadError::InvalidValue { .. })
        ));
        assert!(matches!(
            GameConfig::parse("lives_count"),
            Err(LoadError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_json_rejects_unknown_fields() {
        let config = GameConfig::from_json(r#"{"glue_chance": 0.75}"#).unwrap();
        assert_eq!(config.glue_chance, 0.75);
        assert!(GameConfig::from_json(r#"{"gravity": 1.0}"#).is_err());
    }
}
