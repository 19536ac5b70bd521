use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::config::schema::TriggerRule;

use super::state::ClassificationState;

/// Deterministic first-line classifier.
///
/// Checks the file's column headers against configured keyword rules in
/// priority order. A hit classifies the state immediately and lets the
/// pipeline skip the model call; a miss returns the state unchanged. Pure
/// and total — empty columns simply never match.
pub struct RuleClassifier {
    rules: Vec<TriggerRule>,
    /// Pre-compiled file-name patterns, indexed by pattern string.
    compiled_patterns: HashMap<String, Regex>,
}

impl RuleClassifier {
    pub fn new(mut rules: Vec<TriggerRule>) -> Self {
        // Sort rules by priority (descending)
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));

        // Pre-compile file-name patterns; invalid patterns never match
        let mut compiled_patterns = HashMap::new();
        for rule in &rules {
            if let Some(pattern) = &rule.file_pattern {
                if !compiled_patterns.contains_key(pattern) {
                    if let Ok(regex) = Regex::new(pattern) {
                        compiled_patterns.insert(pattern.clone(), regex);
                    }
                }
            }
        }

        Self {
            rules,
            compiled_patterns,
        }
    }

    pub fn classify(&self, state: ClassificationState) -> ClassificationState {
        let columns: HashSet<String> = state
            .columns
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect();

        for rule in &self.rules {
            if self.matches(rule, &columns, &state.file_name) {
                log::debug!("Rule '{}' matched file '{}'", rule.id, state.file_name);
                return state.with_classification(
                    rule.data_type,
                    rule.confidence,
                    rule.reasoning.clone(),
                );
            }
        }

        state
    }

    fn matches(&self, rule: &TriggerRule, columns: &HashSet<String>, file_name: &str) -> bool {
        let keyword_hit = rule
            .keywords
            .iter()
            .any(|k| columns.contains(&k.to_lowercase()));
        if !keyword_hit {
            return false;
        }

        match &rule.file_pattern {
            Some(pattern) => self
                .compiled_patterns
                .get(pattern)
                .map(|regex| regex.is_match(file_name))
                .unwrap_or(false),
            None => true,
        }
    }
}
