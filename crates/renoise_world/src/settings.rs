use crate::error::NoiseError;
use crate::lattice::check_frequency;
use crate::world::MIN_WORLD_SIZE;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of a world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldSettings {
    /// Chunks per world side, including the gradient-only border ring.
    #[cfg_attr(feature = "serde", serde(rename = "worldSize"))]
    pub size: i32,
    /// Lattice cells per world unit.
    pub frequency: f64,
    /// Fixed seed for reproducible worlds.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub seed: Option<u64>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            size: 8,
            frequency: 0.2,
            seed: None,
        }
    }
}

impl WorldSettings {
    pub fn new(size: i32, frequency: f64) -> Self {
        Self {
            size,
            frequency,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs every check world construction would, without allocating.
    pub fn validate(&self) -> Result<(), NoiseError> {
        check_frequency(self.frequency)?;
        if self.size < MIN_WORLD_SIZE {
            return Err(NoiseError::WorldTooSmall(self.size));
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn from_json(bytes: &[u8]) -> Result<Self, NoiseError> {
        let settings: WorldSettings = serde_json::from_slice(bytes)?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_describe_a_valid_world() {
        assert!(WorldSettings::default().validate().is_ok());
        assert!(WorldSettings::new(3, 1.0 / 16.0).validate().is_ok());
        assert!(WorldSettings::new(2, 0.2).validate().is_err());
        assert!(WorldSettings::new(8, 0.01).validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parse_json() {
        let settings = WorldSettings::from_json(br#"{"worldSize": 12, "seed": 4}"#).unwrap();
        assert_eq!(settings, WorldSettings::new(12, 0.2).with_seed(4));

        let err = WorldSettings::from_json(br#"{"frequency": 0.01}"#).unwrap_err();
        assert!(matches!(err, NoiseError::FrequencyTooLow { .. }));

        let err = WorldSettings::from_json(b"{").unwrap_err();
        assert!(matches!(err, NoiseError::Settings(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unseeded_settings_omit_seed() {
        let json = serde_json::to_string(&WorldSettings::default()).unwrap();
        assert_eq!(json, r#"{"worldSize":8,"frequency":0.2}"#);
    }
}
