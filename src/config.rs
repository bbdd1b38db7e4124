use std::path::Path;

use crate::ai::algorithms::NnqConfig;
use crate::ai::networks::QNetworkConfig;
use crate::error::ConfigError;
use crate::game::BOARD_SIZE;
use crate::training::trainer::TrainerConfig;

/// Shape and learning rate of the action-value network.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub hidden_multiplier: usize,
    pub learning_rate: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            hidden_multiplier: 128,
            learning_rate: 0.01,
        }
    }
}

impl NetworkConfig {
    /// Network config for the tic-tac-toe board.
    pub fn to_q_network_config(&self) -> QNetworkConfig {
        QNetworkConfig::new(BOARD_SIZE)
            .with_hidden_multiplier(self.hidden_multiplier)
            .with_learning_rate(self.learning_rate)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: NnqConfig,
    pub network: NetworkConfig,
    pub training: TrainerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "network.learning_rate must be > 0".into(),
            ));
        }
        if self.network.hidden_multiplier == 0 {
            return Err(ConfigError::Validation(
                "network.hidden_multiplier must be >= 1".into(),
            ));
        }

        let agent = &self.agent;
        if !(0.0..=1.0).contains(&agent.reward_discount) {
            return Err(ConfigError::Validation(
                "agent.reward_discount must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&agent.random_move_prob) {
            return Err(ConfigError::Validation(
                "agent.random_move_prob must be in [0, 1]".into(),
            ));
        }
        if agent.random_move_decay <= 0.0 || agent.random_move_decay > 1.0 {
            return Err(ConfigError::Validation(
                "agent.random_move_decay must be in (0, 1]".into(),
            ));
        }
        if agent.loss_value > agent.draw_value || agent.draw_value > agent.win_value {
            return Err(ConfigError::Validation(
                "agent rewards must satisfy loss_value <= draw_value <= win_value".into(),
            ));
        }

        if self.training.num_games == 0 {
            return Err(ConfigError::Validation(
                "training.num_games must be > 0".into(),
            ));
        }
        if self.training.metrics_window == 0 {
            return Err(ConfigError::Validation(
                "training.metrics_window must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert!((config.agent.reward_discount - 0.8).abs() < 1e-6);
        assert!((config.network.learning_rate - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[agent]
random_move_prob = 0.3
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!((config.agent.random_move_prob - 0.3).abs() < 1e-6);
        // Other fields should be defaults
        assert!((config.agent.draw_value - 0.6).abs() < 1e-6);
        assert_eq!(config.training.num_games, 10_000);
        assert_eq!(config.network.hidden_multiplier, 128);
    }

    #[test]
    fn test_network_config_targets_board() {
        let config = NetworkConfig {
            hidden_multiplier: 2,
            learning_rate: 0.05,
        }
        .to_q_network_config();
        assert_eq!(config.board_size, 9);
        assert_eq!(config.hidden_size(), 54);
        assert!((config.learning_rate - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_validation_rejects_zero_games() {
        let mut config = AppConfig::default();
        config.training.num_games = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_nonpositive_lr() {
        let mut config = AppConfig::default();
        config.network.learning_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_invalid_discount() {
        let mut config = AppConfig::default();
        config.agent.reward_discount = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_decay() {
        let mut config = AppConfig::default();
        config.agent.random_move_decay = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unordered_rewards() {
        let mut config = AppConfig::default();
        config.agent.draw_value = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.training.num_games, 10_000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[training]
num_games = 500
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.training.num_games, 500);
        // Others are defaults
        assert!((config.agent.random_move_decay - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_config.toml");
        std::fs::write(&path, "[network]\nlearning_rate = -1.0\n").unwrap();
        let result = AppConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
