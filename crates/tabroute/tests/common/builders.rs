//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use serde_json::{Map, Value};
use tabroute::config::schema::TriggerRule;
use tabroute::{DataType, IngestRequest};

/// Builder for creating `TriggerRule` instances.
pub struct RuleBuilder {
    rule: TriggerRule,
}

impl RuleBuilder {
    pub fn new(id: &str, data_type: DataType) -> Self {
        Self {
            rule: TriggerRule {
                id: id.to_string(),
                priority: 0,
                keywords: vec![],
                file_pattern: None,
                data_type,
                confidence: 0.9,
                reasoning: format!("matched rule '{}'", id),
            },
        }
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.rule.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.rule.priority = priority;
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.rule.confidence = confidence;
        self
    }

    pub fn file_pattern(mut self, pattern: &str) -> Self {
        self.rule.file_pattern = Some(pattern.to_string());
        self
    }

    pub fn build(self) -> TriggerRule {
        self.rule
    }
}

/// Builds an `IngestRequest` from column names and optional rows.
pub fn request(file_name: &str, columns: &[&str]) -> IngestRequest {
    IngestRequest {
        file_name: file_name.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        sample_rows: vec![],
    }
}

pub fn row(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
