use crate::error::ChessError;
use crate::logic::eval_constants::{KING_CAPTURE_VALUE, MAX_KING_CAPTURE_VALUE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Search Parameters
    pub search_depth: u8,
    pub shuffle_moves: bool,
    pub alpha_beta: bool, // false: plain minimax over the same tree

    // Move Generation
    pub in_check_defenses: bool, // also allow blocking/capturing the checker
    pub king_capture_value: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            shuffle_moves: true,
            alpha_beta: true,

            in_check_defenses: false,
            king_capture_value: KING_CAPTURE_VALUE,
        }
    }
}

impl EngineConfig {
    /// Reads a config from JSON. Missing keys keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, ChessError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the search cannot score with.
    pub fn validate(&self) -> Result<(), ChessError> {
        if !(1..=MAX_KING_CAPTURE_VALUE).contains(&self.king_capture_value) {
            return Err(ChessError::ConfigValue(format!(
                "king_capture_value must be in 1..={MAX_KING_CAPTURE_VALUE}, got {}",
                self.king_capture_value
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.search_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search_depth, 3);
        assert!(config.shuffle_moves);
        assert!(config.alpha_beta);
        assert!(!config.in_check_defenses);
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{
            "search_depth": 2,
            "in_check_defenses": true
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.search_depth, 2);
        assert!(config.in_check_defenses);
        // Others should be default
        assert_eq!(config.king_capture_value, KING_CAPTURE_VALUE);
        assert!(config.shuffle_moves);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let result = EngineConfig::load_from_json("{ invalid json }");
        assert!(matches!(result, Err(ChessError::Config(_))));
    }

    #[test]
    fn test_load_config_wrong_type() {
        let result = EngineConfig::load_from_json(r#"{ "search_depth": "deep" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_rejects_out_of_range_king_value() {
        for value in [i32::MAX, 2_000_000, MAX_KING_CAPTURE_VALUE + 1, 0, -5] {
            let json = format!(r#"{{ "king_capture_value": {value} }}"#);
            let result = EngineConfig::load_from_json(&json);
            assert!(
                matches!(result, Err(ChessError::ConfigValue(_))),
                "{value} accepted"
            );
        }

        let json = format!(r#"{{ "king_capture_value": {MAX_KING_CAPTURE_VALUE} }}"#);
        let config = EngineConfig::load_from_json(&json).unwrap();
        assert_eq!(config.king_capture_value, MAX_KING_CAPTURE_VALUE);
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = EngineConfig::default().with_depth(5);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::load_from_json(&json).unwrap(), config);
    }
}
