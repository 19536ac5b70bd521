//! Table-driven tests for the rule classifier.
//!
//! Cover keyword matching, priority ordering, file patterns and the
//! unchanged-state fallthrough.

mod common;

use common::builders::RuleBuilder;
use tabroute::{ClassificationState, DataType, RuleClassifier};

/// Represents a single rule-classification test case.
struct RuleTestCase {
    /// Test case name for identification.
    name: &'static str,
    file_name: &'static str,
    columns: &'static [&'static str],
    expected_data_type: DataType,
    expected_confidence: f64,
}

const DEFAULT_RULE_TESTS: &[RuleTestCase] = &[
    RuleTestCase {
        name: "both_trigger_columns",
        file_name: "txns.csv",
        columns: &["txn_id", "amount", "date"],
        expected_data_type: DataType::AcquirerTransaction,
        expected_confidence: 0.9,
    },
    RuleTestCase {
        name: "single_trigger_column",
        file_name: "export.csv",
        columns: &["amount", "currency"],
        expected_data_type: DataType::AcquirerTransaction,
        expected_confidence: 0.9,
    },
    RuleTestCase {
        name: "uppercase_trigger_column",
        file_name: "export.csv",
        columns: &["TXN_ID", "merchant"],
        expected_data_type: DataType::AcquirerTransaction,
        expected_confidence: 0.9,
    },
    RuleTestCase {
        name: "no_trigger_columns",
        file_name: "rates.csv",
        columns: &["acquirer", "terminal_id", "mdr_rate"],
        expected_data_type: DataType::Unknown,
        expected_confidence: 0.0,
    },
    RuleTestCase {
        name: "empty_columns",
        file_name: "blank.csv",
        columns: &[],
        expected_data_type: DataType::Unknown,
        expected_confidence: 0.0,
    },
    RuleTestCase {
        name: "substring_is_not_a_match",
        file_name: "export.csv",
        columns: &["txn_id_old", "amounts"],
        expected_data_type: DataType::Unknown,
        expected_confidence: 0.0,
    },
];

fn default_classifier() -> RuleClassifier {
    RuleClassifier::new(tabroute::config::ClassificationConfig::default().rules)
}

fn state(file_name: &str, columns: &[&str]) -> ClassificationState {
    ClassificationState::new(
        file_name,
        columns.iter().map(|c| c.to_string()).collect(),
        vec![],
    )
}

#[test]
fn default_rule_table() {
    let classifier = default_classifier();
    for case in DEFAULT_RULE_TESTS {
        let result = classifier.classify(state(case.file_name, case.columns));
        assert_eq!(
            result.data_type, case.expected_data_type,
            "case '{}' data_type",
            case.name
        );
        assert_eq!(
            result.confidence, case.expected_confidence,
            "case '{}' confidence",
            case.name
        );
    }
}

#[test]
fn higher_priority_rule_wins() {
    let classifier = RuleClassifier::new(vec![
        RuleBuilder::new("generic", DataType::Document)
            .keywords(&["amount"])
            .priority(10)
            .build(),
        RuleBuilder::new("transactions", DataType::AcquirerTransaction)
            .keywords(&["amount"])
            .priority(100)
            .build(),
    ]);

    let result = classifier.classify(state("export.csv", &["amount"]));
    assert_eq!(result.data_type, DataType::AcquirerTransaction);
    assert_eq!(result.reasoning, "matched rule 'transactions'");
}

#[test]
fn file_pattern_gates_keyword_match() {
    let classifier = RuleClassifier::new(vec![RuleBuilder::new(
        "csv-transactions",
        DataType::AcquirerTransaction,
    )
    .keywords(&["txn_id"])
    .file_pattern(r"(?i)\.csv$")
    .build()]);

    let hit = classifier.classify(state("export.CSV", &["txn_id"]));
    assert_eq!(hit.data_type, DataType::AcquirerTransaction);

    let miss = classifier.classify(state("export.xlsx", &["txn_id"]));
    assert_eq!(miss.data_type, DataType::Unknown);
}

#[test]
fn custom_rule_confidence_and_reasoning_carry_through() {
    let classifier = RuleClassifier::new(vec![RuleBuilder::new("rate-card", DataType::Reference)
        .keywords(&["mdr_rate"])
        .confidence(0.85)
        .build()]);

    let result = classifier.classify(state("rates.csv", &["MDR_Rate"]));
    assert_eq!(result.data_type, DataType::Reference);
    assert_eq!(result.confidence, 0.85);
    assert_eq!(result.reasoning, "matched rule 'rate-card'");
}
