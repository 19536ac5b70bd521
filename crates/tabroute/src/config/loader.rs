use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../../../schema/config-v1.json");

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let errors: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();
    if !errors.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: errors.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Validate version
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    let threshold = config.classification.acceptance_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::Validation {
            message: format!("Acceptance threshold {} out of range [0, 1]", threshold),
        });
    }

    if config.model.model.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "Model identifier must not be empty".to_string(),
        });
    }

    // Validate rules
    let mut rule_ids = std::collections::HashSet::new();
    for rule in &config.classification.rules {
        if !rule_ids.insert(&rule.id) {
            return Err(ConfigError::InvalidRule {
                id: rule.id.clone(),
                reason: "Duplicate rule ID".to_string(),
            });
        }

        if rule.keywords.is_empty() {
            return Err(ConfigError::InvalidRule {
                id: rule.id.clone(),
                reason: "Rule must have at least one keyword".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&rule.confidence) {
            return Err(ConfigError::InvalidRule {
                id: rule.id.clone(),
                reason: format!("Confidence {} out of range [0, 1]", rule.confidence),
            });
        }

        if let Some(pattern) = &rule.file_pattern {
            if let Err(e) = regex::Regex::new(pattern) {
                return Err(ConfigError::InvalidRule {
                    id: rule.id.clone(),
                    reason: format!("Invalid file pattern: {}", e),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::state::DataType;

    #[test]
    fn test_minimal_config_loads() {
        let config = load_config_from_str(r#"{"version": "1.0"}"#).unwrap();
        assert_eq!(config.classification.acceptance_threshold, 0.7);
        assert_eq!(config.classification.rules.len(), 1);
    }

    #[test]
    fn test_full_config_loads() {
        let config = load_config_from_str(
            r#"{
                "version": "1.0",
                "model": {
                    "baseUrl": "https://example.test/v1",
                    "model": "test-model",
                    "apiKeyEnv": "TEST_KEY",
                    "timeoutSecs": 10
                },
                "classification": {
                    "acceptanceThreshold": 0.8,
                    "rules": [
                        {
                            "id": "rate-card",
                            "keywords": ["mdr_rate"],
                            "dataType": "REFERENCE",
                            "confidence": 0.85,
                            "reasoning": "rate card columns"
                        }
                    ]
                },
                "database": {"path": "/tmp/tabroute.db"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.model.model, "test-model");
        assert_eq!(config.classification.acceptance_threshold, 0.8);
        assert_eq!(config.classification.rules[0].data_type, DataType::Reference);
        assert_eq!(config.database.path.as_deref(), Some("/tmp/tabroute.db"));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let err = load_config_from_str(r#"{"version": "2.0"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_schema_rejects_unknown_keys() {
        let err = load_config_from_str(r#"{"version": "1.0", "extra": true}"#).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaValidation { .. }));
    }

    #[test]
    fn test_schema_rejects_out_of_range_threshold() {
        let err = load_config_from_str(
            r#"{"version": "1.0", "classification": {"acceptanceThreshold": 1.5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::SchemaValidation { .. }));
    }

    #[test]
    fn test_duplicate_rule_ids_rejected() {
        let err = load_config_from_str(
            r#"{
                "version": "1.0",
                "classification": {
                    "rules": [
                        {"id": "r", "keywords": ["a"], "dataType": "DOCUMENT"},
                        {"id": "r", "keywords": ["b"], "dataType": "REFERENCE"}
                    ]
                }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { .. }));
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let err = load_config_from_str(
            r#"{
                "version": "1.0",
                "classification": {
                    "rules": [{"id": "r", "keywords": [], "dataType": "DOCUMENT"}]
                }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { .. }));
    }

    #[test]
    fn test_invalid_file_pattern_rejected() {
        let err = load_config_from_str(
            r#"{
                "version": "1.0",
                "classification": {
                    "rules": [
                        {"id": "r", "keywords": ["a"], "filePattern": "[bad", "dataType": "DOCUMENT"}
                    ]
                }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_config("/nonexistent/tabroute-config.json").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
