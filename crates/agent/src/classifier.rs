//! Intent classification — maps free text to a symbolic intent label.
//!
//! A deliberately coarse, replaceable heuristic: an ordered list of
//! `(keyword set, label)` rules, evaluated first-match-wins against the
//! lowercased message. What matters is the contract, not the accuracy:
//! identical input always yields the identical label, and ties break in
//! rule declaration order.

use mentora_config::{ClassifierConfig, RuleConfig};
use serde::{Deserialize, Serialize};

/// A single classification rule: if any keyword occurs in the message,
/// the rule's label wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRule {
    /// Keywords matched case-insensitively as substrings
    pub keywords: Vec<String>,

    /// The intent label this rule produces
    pub label: String,
}

impl IntentRule {
    pub fn new(keywords: &[&str], label: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            label: label.to_string(),
        }
    }
}

/// Ordered-rule intent classifier.
///
/// Pure and stateless: no hidden state, no randomness.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
    default_label: String,
}

impl IntentClassifier {
    pub fn new(rules: Vec<IntentRule>, default_label: impl Into<String>) -> Self {
        Self {
            rules,
            default_label: default_label.into(),
        }
    }

    /// Classify a message. The first rule (in declaration order) with any
    /// matching keyword wins; no match yields the default label.
    pub fn classify(&self, text: &str) -> &str {
        let lowered = text.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|keyword| lowered.contains(keyword.as_str())) {
                return &rule.label;
            }
        }
        &self.default_label
    }

    /// The label returned when no rule matches.
    pub fn default_label(&self) -> &str {
        &self.default_label
    }
}

impl From<&RuleConfig> for IntentRule {
    fn from(rule: &RuleConfig) -> Self {
        Self {
            keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
            label: rule.label.clone(),
        }
    }
}

impl From<&ClassifierConfig> for IntentClassifier {
    /// Build a classifier from a loaded rule table, keeping the
    /// configured rule order.
    fn from(config: &ClassifierConfig) -> Self {
        Self::new(
            config.rules.iter().map(IntentRule::from).collect(),
            config.default_label.clone(),
        )
    }
}

impl Default for IntentClassifier {
    /// The reference rule table for the student-mentoring domain.
    fn default() -> Self {
        Self::new(
            vec![
                IntentRule::new(
                    &["grade", "course", "class", "study", "academic"],
                    "academic_advisor",
                ),
                IntentRule::new(
                    &["career", "job", "profession", "employment"],
                    "career_counselor",
                ),
                IntentRule::new(
                    &["sad", "happy", "anxious", "stressed", "emotion", "feel"],
                    "emotional_support",
                ),
                IntentRule::new(
                    &["project", "assignment", "thesis", "research"],
                    "project_mentor",
                ),
            ],
            "academic_advisor",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn academic_keywords_match() {
        let classifier = IntentClassifier::default();
        assert_eq!(
            classifier.classify("I'm failing my course, what should I do about grades?"),
            "academic_advisor"
        );
    }

    #[test]
    fn classification_is_case_insensitive() {
        let classifier = IntentClassifier::default();
        assert_eq!(classifier.classify("CAREER advice please"), "career_counselor");
    }

    #[test]
    fn no_match_yields_default_label() {
        let classifier = IntentClassifier::default();
        assert_eq!(classifier.classify("hello"), "academic_advisor");
    }

    #[test]
    fn first_matching_rule_wins() {
        // "study" (rule 1) and "job" (rule 2) both occur; rule order decides.
        let classifier = IntentClassifier::default();
        assert_eq!(
            classifier.classify("should I study more or find a job?"),
            "academic_advisor"
        );
    }

    #[test]
    fn classifier_builds_from_loaded_config() {
        let config = mentora_config::AppConfig::default();
        let classifier = IntentClassifier::from(&config.classifier);

        assert_eq!(classifier.classify("thinking about my career"), "career_counselor");
        assert_eq!(classifier.classify("I feel anxious"), "emotional_support");
        assert_eq!(classifier.classify("hello"), "academic_advisor");
    }

    #[test]
    fn configured_rules_replace_the_reference_table() {
        let config = ClassifierConfig {
            default_label: "general_mentor".into(),
            rules: vec![RuleConfig {
                keywords: vec!["Internship".into()],
                label: "career_counselor".into(),
            }],
        };
        let classifier = IntentClassifier::from(&config);

        // Configured keywords match case-insensitively, like built-in ones.
        assert_eq!(classifier.classify("an INTERNSHIP offer"), "career_counselor");
        // The reference table is gone entirely.
        assert_eq!(classifier.classify("my grades are slipping"), "general_mentor");
        assert_eq!(classifier.default_label(), "general_mentor");
    }

    #[test]
    fn classification_is_deterministic() {
        let classifier = IntentClassifier::default();
        let text = "I feel stressed about my thesis";
        let first = classifier.classify(text).to_string();
        for _ in 0..10 {
            assert_eq!(classifier.classify(text), first);
        }
    }
}
