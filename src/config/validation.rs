//! Validation engine for run configurations.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`RankConfig`] and collects every diagnostic into a [`ValidationReport`].
//! It never short-circuits on the first error, so users see all problems at
//! once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use review_rank::config::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&config);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::RankConfig;

// ─── Error codes ────────────────────────────────────────────────────────────

/// Stable machine-readable category of a config problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    UnsupportedVersion,
    InvalidTopics,
    OutOfRange,
    ColumnConflict,
    UnknownField,
}

/// One config problem, located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigIssue {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigIssue {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding with its severity.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub issue: ConfigIssue,
}

impl ValidationDiagnostic {
    pub fn error(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn warning(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.issue)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.issue)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`RankConfig`] and returns
/// zero or more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"topics"`).
    fn name(&self) -> &str;

    /// Inspect `config` and return any findings.
    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`RankConfig`] and collects
/// all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(TopicsRule));
        engine.add_rule(Box::new(PageRankParamsRule));
        engine.add_rule(Box::new(EvaluationParamsRule));
        engine.add_rule(Box::new(ScoreColumnRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Run all rules against `config` and return the collected report.
    pub fn validate(&self, config: &RankConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            let found = rule.validate(config);
            if !found.is_empty() {
                tracing::debug!(rule = rule.name(), count = found.len(), "config diagnostics");
            }
            report.diagnostics.extend(found);
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Only version 1 is understood ────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        if config.v == 1 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigIssue::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("unsupported config version {}", config.v),
            )
            .with_hint("Set \"v\": 1"),
        )]
    }
}

// ─── 2. Topics: non-empty, named, unique ────────────────────────────────────

struct TopicsRule;

impl ValidationRule for TopicsRule {
    fn name(&self) -> &str {
        "topics"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        if config.topics.is_empty() {
            return vec![ValidationDiagnostic::error(
                ConfigIssue::new(
                    ErrorCode::InvalidTopics,
                    "/topics",
                    "at least one topic is required",
                )
                .with_hint("List the topics whose indicator columns the tables carry"),
            )];
        }

        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for (i, topic) in config.topics.iter().enumerate() {
            if topic.trim().is_empty() {
                out.push(ValidationDiagnostic::error(ConfigIssue::new(
                    ErrorCode::InvalidTopics,
                    format!("/topics/{i}"),
                    "topic name is empty",
                )));
            } else if !seen.insert(topic) {
                out.push(ValidationDiagnostic::error(ConfigIssue::new(
                    ErrorCode::InvalidTopics,
                    format!("/topics/{i}"),
                    format!("duplicate topic \"{topic}\""),
                )));
            }
        }
        out
    }
}

// ─── 3. PageRank parameters in range ────────────────────────────────────────

struct PageRankParamsRule;

impl ValidationRule for PageRankParamsRule {
    fn name(&self) -> &str {
        "pagerank_params"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        let pr = &config.pagerank;
        let mut out = Vec::new();

        if !(pr.damping > 0.0 && pr.damping < 1.0) {
            out.push(ValidationDiagnostic::error(
                ConfigIssue::new(
                    ErrorCode::OutOfRange,
                    "/pagerank/damping",
                    format!("damping must be in (0, 1), got {}", pr.damping),
                )
                .with_hint("The usual value is 0.85"),
            ));
        }
        if !(pr.tolerance > 0.0 && pr.tolerance.is_finite()) {
            out.push(ValidationDiagnostic::error(ConfigIssue::new(
                ErrorCode::OutOfRange,
                "/pagerank/tolerance",
                format!("tolerance must be a positive number, got {}", pr.tolerance),
            )));
        }
        if pr.max_iterations == 0 {
            out.push(ValidationDiagnostic::error(ConfigIssue::new(
                ErrorCode::OutOfRange,
                "/pagerank/max_iterations",
                "max_iterations must be greater than 0",
            )));
        }
        out
    }
}

// ─── 4. Evaluation sizes must be positive ───────────────────────────────────

struct EvaluationParamsRule;

impl ValidationRule for EvaluationParamsRule {
    fn name(&self) -> &str {
        "evaluation_params"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        let checks: &[(&str, usize)] = &[
            ("subset_size", config.evaluation.subset_size),
            ("trials", config.evaluation.trials),
        ];

        checks
            .iter()
            .filter(|(_, value)| *value == 0)
            .map(|(field, _)| {
                ValidationDiagnostic::error(ConfigIssue::new(
                    ErrorCode::OutOfRange,
                    format!("/evaluation/{field}"),
                    format!("{field} must be greater than 0"),
                ))
            })
            .collect()
    }
}

// ─── 5. Score column must not shadow an indicator column ────────────────────

struct ScoreColumnRule;

impl ValidationRule for ScoreColumnRule {
    fn name(&self) -> &str {
        "score_column"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        let column = &config.score_column;
        if column.trim().is_empty() {
            return vec![ValidationDiagnostic::error(ConfigIssue::new(
                ErrorCode::ColumnConflict,
                "/score_column",
                "score column name is empty",
            ))];
        }
        if config.topics.indicator_columns().contains(column) {
            return vec![ValidationDiagnostic::error(ConfigIssue::new(
                ErrorCode::ColumnConflict,
                "/score_column",
                format!("score column \"{column}\" collides with an indicator column"),
            ))];
        }
        vec![]
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    /// Collect unknown-field diagnostics at the given JSON pointer `path`
    /// from a `HashMap` of extra fields captured by `#[serde(flatten)]`.
    fn check_unknowns(
        path: &str,
        unknowns: &std::collections::HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<_> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ConfigIssue::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &config.unknown_fields, config.strict));
        out.extend(Self::check_unknowns(
            "/pagerank",
            &config.pagerank.unknown_fields,
            config.strict,
        ));
        out.extend(Self::check_unknowns(
            "/evaluation",
            &config.evaluation.unknown_fields,
            config.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a RankConfig from JSON.
    fn config(json: &str) -> RankConfig {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    // ─── Valid configs ──────────────────────────────────────────────────

    #[test]
    fn test_default_config_is_valid() {
        let report = engine().validate(&RankConfig::default());
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_custom_topics_are_valid() {
        let report = engine().validate(&config(r#"{ "v": 1, "topics": ["Wifi", "Parking"] }"#));
        assert!(report.is_valid());
    }

    // ─── Rule: version ──────────────────────────────────────────────────

    #[test]
    fn test_unknown_version_fails() {
        let report = engine().validate(&config(r#"{ "v": 2 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnsupportedVersion);
        assert_eq!(errs[0].path, "/v");
    }

    // ─── Rule: topics ───────────────────────────────────────────────────

    #[test]
    fn test_empty_topics_fail() {
        let report = engine().validate(&config(r#"{ "topics": [] }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::InvalidTopics);
    }

    #[test]
    fn test_duplicate_and_blank_topics_reported_together() {
        let report = engine().validate(&config(r#"{ "topics": ["Staff", " ", "Staff"] }"#));
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/topics/1", "/topics/2"]);
    }

    // ─── Rule: pagerank_params ──────────────────────────────────────────

    #[test]
    fn test_all_pagerank_problems_reported() {
        let report = engine().validate(&config(
            r#"{ "pagerank": { "damping": 0.0, "tolerance": 0.0, "max_iterations": 0 } }"#,
        ));
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/pagerank/damping", "/pagerank/tolerance", "/pagerank/max_iterations"]
        );
    }

    #[test]
    fn test_damping_of_one_fails() {
        let report = engine().validate(&config(r#"{ "pagerank": { "damping": 1.0 } }"#));
        assert!(report.has_errors());
    }

    // ─── Rule: evaluation_params ────────────────────────────────────────

    #[test]
    fn test_zero_subset_size_fails() {
        let report = engine().validate(&config(r#"{ "evaluation": { "subset_size": 0 } }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/evaluation/subset_size");
    }

    // ─── Rule: score_column ─────────────────────────────────────────────

    #[test]
    fn test_score_column_collision_fails() {
        let report = engine().validate(&config(
            r#"{ "topics": ["Staff"], "score_column": "Staff - positive" }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::ColumnConflict);
    }

    // ─── Rule: unknown_fields ───────────────────────────────────────────

    #[test]
    fn test_unknown_fields_warn_when_not_strict() {
        let report = engine().validate(&config(r#"{ "bogus": 1, "pagerank": { "alpha": 0.5 } }"#));
        assert!(report.is_valid());
        let paths: Vec<_> = report.warnings().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["/bogus", "/pagerank/alpha"]);
    }

    #[test]
    fn test_unknown_fields_error_when_strict() {
        let report = engine().validate(&config(r#"{ "strict": true, "evaluation": { "k": 3 } }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnknownField);
        assert_eq!(errs[0].path, "/evaluation/k");
    }

    #[test]
    fn test_issue_display_includes_hint() {
        let issue = ConfigIssue::new(ErrorCode::OutOfRange, "/x", "bad").with_hint("fix it");
        assert_eq!(issue.to_string(), "/x: bad (fix it)");
    }
}
