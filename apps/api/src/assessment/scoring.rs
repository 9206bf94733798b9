//! Fit scoring: maps quiz selections onto the five capability categories.
//!
//! Default: `QuizFitScorer` (pure, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn FitScorer>`, swapped at startup.

use async_trait::async_trait;

use crate::assessment::models::{
    Capability, CapabilityKind, FitAssessment, FitLevel, Selections, NO_CODE, SLACK,
};

pub const TOTAL_CAPABILITIES: usize = CapabilityKind::ALL.len();

// ────────────────────────────────────────────────────────────────────────────
// Copy
// ────────────────────────────────────────────────────────────────────────────

const SLACK_LABEL: &str = "Auto-receive alerts via Slack";
const SLACK_DESCRIPTION: &str =
    "Cleric joins your Slack channels to receive alerts and respond with investigations automatically";
const MANUAL_LABEL: &str = "Manual investigations via web UI";
const MANUAL_DESCRIPTION: &str =
    "Manually trigger investigations through the web interface when issues arise";

const LOGS_LABEL: &str = "Search logs and trace errors";
const LOGS_DESCRIPTION: &str =
    "Query log systems to find error patterns, trace request flows, and identify root causes across distributed services";
const METRICS_LABEL: &str = "Query metrics and detect anomalies";
const METRICS_DESCRIPTION: &str =
    "Analyze time-series data to identify performance degradations, resource bottlenecks, and abnormal patterns";
const INFRA_LABEL: &str = "Debug infrastructure state";
const INFRA_DESCRIPTION: &str =
    "Run kubectl, AWS CLI, and other cloud tools to inspect pods, containers, deployments, and cloud resources during investigations";
const CODE_LABEL: &str = "Analyze code, deployments, and CI/CD";
const CODE_DESCRIPTION: &str =
    "Review recent code changes, examine deployment history, check CI/CD logs, and suggest code fixes based on error patterns";

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scoring backend. Implement this to swap the scorer without touching handlers.
#[async_trait]
pub trait FitScorer: Send + Sync {
    async fn score(&self, selections: &Selections) -> FitAssessment;

    /// Short backend name, logged with each assessment.
    fn backend(&self) -> &'static str;
}

/// Rule-based scorer over the quiz answers.
pub struct QuizFitScorer;

#[async_trait]
impl FitScorer for QuizFitScorer {
    async fn score(&self, selections: &Selections) -> FitAssessment {
        compute_fit_assessment(selections)
    }

    fn backend(&self) -> &'static str {
        "quiz"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Either nothing has been answered yet, or the answers have been scored.
/// Kept apart so an untouched quiz never reads as a zero-coverage result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment {
    Uninitiated,
    Scored { capabilities: Vec<Capability> },
}

impl Assessment {
    pub fn from_selections(s: &Selections) -> Self {
        if s.is_untouched() {
            return Assessment::Uninitiated;
        }
        let capabilities = CapabilityKind::ALL
            .iter()
            .map(|&kind| scored_capability(kind, s))
            .collect();
        Assessment::Scored { capabilities }
    }
}

impl From<Assessment> for FitAssessment {
    fn from(assessment: Assessment) -> Self {
        match assessment {
            Assessment::Uninitiated => FitAssessment {
                level: FitLevel::Initial,
                title: "Select your stack".to_string(),
                description: "See what Cleric can do for you".to_string(),
                capabilities: CapabilityKind::ALL
                    .iter()
                    .map(|&kind| generic_capability(kind))
                    .collect(),
                can_continue: false,
                enabled_count: 0,
                total_count: TOTAL_CAPABILITIES,
            },
            Assessment::Scored { capabilities } => {
                let enabled_count = capabilities.iter().filter(|c| c.enabled).count();
                let (level, title, description) = classify(enabled_count);
                FitAssessment {
                    level,
                    title: title.to_string(),
                    description,
                    capabilities,
                    can_continue: level > FitLevel::Poor,
                    enabled_count,
                    total_count: TOTAL_CAPABILITIES,
                }
            }
        }
    }
}

/// Scores a set of quiz answers. Total and side-effect free.
pub fn compute_fit_assessment(selections: &Selections) -> FitAssessment {
    Assessment::from_selections(selections).into()
}

/// Maps an enabled-capability count to level, title, and description.
fn classify(enabled_count: usize) -> (FitLevel, &'static str, String) {
    match enabled_count {
        0 | 1 => (
            FitLevel::Poor,
            "Insufficient stack coverage",
            "Requires logs or metrics integration".to_string(),
        ),
        2 => (
            FitLevel::Minimal,
            "Basic coverage",
            format!("2/{TOTAL_CAPABILITIES} capabilities enabled"),
        ),
        3 | 4 => (
            FitLevel::Good,
            "Good coverage",
            format!("{enabled_count}/{TOTAL_CAPABILITIES} capabilities enabled"),
        ),
        _ => (
            FitLevel::Excellent,
            "Complete coverage",
            format!("{TOTAL_CAPABILITIES}/{TOTAL_CAPABILITIES} capabilities enabled"),
        ),
    }
}

fn is_enabled(kind: CapabilityKind, s: &Selections) -> bool {
    match kind {
        CapabilityKind::Communication => !s.communication.is_empty(),
        CapabilityKind::Logs => !s.logs.is_empty(),
        CapabilityKind::Metrics => !s.metrics.is_empty(),
        CapabilityKind::Infrastructure => !s.infrastructure.is_empty(),
        // "no-code" on its own means no access; any other tool still counts.
        CapabilityKind::Code => s.code.iter().any(|v| v != NO_CODE),
    }
}

fn copy_for(kind: CapabilityKind, communication: Option<&str>) -> (&'static str, &'static str) {
    match kind {
        CapabilityKind::Communication => match communication {
            Some(value) if value != SLACK => (MANUAL_LABEL, MANUAL_DESCRIPTION),
            _ => (SLACK_LABEL, SLACK_DESCRIPTION),
        },
        CapabilityKind::Logs => (LOGS_LABEL, LOGS_DESCRIPTION),
        CapabilityKind::Metrics => (METRICS_LABEL, METRICS_DESCRIPTION),
        CapabilityKind::Infrastructure => (INFRA_LABEL, INFRA_DESCRIPTION),
        CapabilityKind::Code => (CODE_LABEL, CODE_DESCRIPTION),
    }
}

fn scored_capability(kind: CapabilityKind, s: &Selections) -> Capability {
    let (label, description) = copy_for(kind, Some(s.communication.as_str()));
    Capability {
        kind,
        enabled: is_enabled(kind, s),
        label: label.to_string(),
        description: description.to_string(),
    }
}

fn generic_capability(kind: CapabilityKind) -> Capability {
    let (label, description) = copy_for(kind, None);
    Capability {
        kind,
        enabled: false,
        label: label.to_string(),
        description: description.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn make_selections(
        communication: &str,
        logs: &[&str],
        infrastructure: &[&str],
        code: &[&str],
        metrics: &[&str],
    ) -> Selections {
        Selections {
            communication: communication.to_string(),
            logs: tokens(logs),
            infrastructure: tokens(infrastructure),
            code: tokens(code),
            metrics: tokens(metrics),
        }
    }

    fn capability(a: &FitAssessment, kind: CapabilityKind) -> &Capability {
        a.capabilities.iter().find(|c| c.kind == kind).unwrap()
    }

    #[test]
    fn test_untouched_selections_are_initial() {
        let a = compute_fit_assessment(&Selections::default());
        assert_eq!(a.level, FitLevel::Initial);
        assert_eq!(a.enabled_count, 0);
        assert_eq!(a.total_count, 5);
        assert!(!a.can_continue);
        assert_eq!(a.title, "Select your stack");
        assert_eq!(a.capabilities.len(), 5);
        assert!(a.capabilities.iter().all(|c| !c.enabled));
        assert_eq!(
            capability(&a, CapabilityKind::Communication).label,
            SLACK_LABEL
        );
    }

    #[test]
    fn test_uninitiated_is_distinct_from_zero_scored() {
        assert_eq!(
            Assessment::from_selections(&Selections::default()),
            Assessment::Uninitiated
        );
        let only_no_code = make_selections("", &[], &[], &["no-code"], &[]);
        let scored = Assessment::from_selections(&only_no_code);
        assert!(matches!(scored, Assessment::Scored { .. }));

        let a: FitAssessment = scored.into();
        assert_eq!(a.enabled_count, 0);
        assert_eq!(a.level, FitLevel::Poor);
        assert!(!a.can_continue);
    }

    #[test]
    fn test_capabilities_in_fixed_order() {
        let a = compute_fit_assessment(&make_selections("slack", &["elk"], &[], &[], &[]));
        let kinds: Vec<_> = a.capabilities.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, CapabilityKind::ALL.to_vec());
    }

    #[test]
    fn test_communication_only_is_poor() {
        let a = compute_fit_assessment(&make_selections("teams", &[], &[], &[], &[]));
        assert_eq!(a.enabled_count, 1);
        assert_eq!(a.level, FitLevel::Poor);
        assert!(!a.can_continue);
        assert_eq!(a.title, "Insufficient stack coverage");
        assert_eq!(a.description, "Requires logs or metrics integration");
    }

    #[test]
    fn test_non_slack_communication_uses_manual_copy() {
        let a = compute_fit_assessment(&make_selections("teams", &[], &[], &[], &[]));
        let comm = capability(&a, CapabilityKind::Communication);
        assert!(comm.enabled);
        assert_eq!(comm.label, MANUAL_LABEL);
        assert_eq!(comm.description, MANUAL_DESCRIPTION);
    }

    #[test]
    fn test_slack_and_logs_is_minimal() {
        let a = compute_fit_assessment(&make_selections("slack", &["elk"], &[], &[], &[]));
        assert_eq!(a.enabled_count, 2);
        assert_eq!(a.level, FitLevel::Minimal);
        assert!(a.can_continue);
        assert_eq!(a.description, "2/5 capabilities enabled");
        assert_eq!(
            capability(&a, CapabilityKind::Communication).label,
            SLACK_LABEL
        );
    }

    #[test]
    fn test_four_capabilities_is_good() {
        let a = compute_fit_assessment(&make_selections(
            "slack",
            &["elk"],
            &["aws"],
            &[],
            &["datadog"],
        ));
        assert_eq!(a.enabled_count, 4);
        assert_eq!(a.level, FitLevel::Good);
        assert!(a.can_continue);
        assert_eq!(a.description, "4/5 capabilities enabled");
    }

    #[test]
    fn test_three_capabilities_is_good() {
        let a = compute_fit_assessment(&make_selections("", &["elk"], &["k8s"], &[], &["prom"]));
        assert_eq!(a.enabled_count, 3);
        assert_eq!(a.level, FitLevel::Good);
        assert_eq!(a.description, "3/5 capabilities enabled");
    }

    #[test]
    fn test_everything_is_excellent() {
        let a = compute_fit_assessment(&make_selections(
            "slack",
            &["elk"],
            &["aws"],
            &["github"],
            &["datadog"],
        ));
        assert_eq!(a.enabled_count, 5);
        assert_eq!(a.level, FitLevel::Excellent);
        assert!(a.can_continue);
        assert_eq!(a.title, "Complete coverage");
        assert_eq!(a.description, "5/5 capabilities enabled");
    }

    #[test]
    fn test_no_code_sentinel_disables_code() {
        let a = compute_fit_assessment(&make_selections("", &[], &[], &["no-code"], &[]));
        assert!(!capability(&a, CapabilityKind::Code).enabled);
    }

    #[test]
    fn test_no_code_with_other_tool_enables_code() {
        let a = compute_fit_assessment(&make_selections(
            "",
            &[],
            &[],
            &["no-code", "other-tool"],
            &[],
        ));
        assert!(capability(&a, CapabilityKind::Code).enabled);
    }

    #[test]
    fn test_enabled_count_matches_capabilities() {
        let cases = [
            make_selections("teams", &[], &[], &["no-code"], &[]),
            make_selections("", &["elk"], &[], &[], &[]),
            make_selections("slack", &["elk"], &["aws", "ecs"], &["github"], &[]),
            make_selections("slack", &["elk"], &["aws"], &["github"], &["datadog"]),
        ];
        for s in &cases {
            let a = compute_fit_assessment(s);
            let counted = a.capabilities.iter().filter(|c| c.enabled).count();
            assert_eq!(a.enabled_count, counted);
            assert_eq!(a.total_count, 5);
        }
    }

    #[test]
    fn test_adding_fields_never_lowers_enabled_count() {
        let steps = [
            make_selections("slack", &[], &[], &[], &[]),
            make_selections("slack", &["elk"], &[], &[], &[]),
            make_selections("slack", &["elk"], &["aws"], &[], &[]),
            make_selections("slack", &["elk"], &["aws"], &["github"], &[]),
            make_selections("slack", &["elk"], &["aws"], &["github"], &["datadog"]),
        ];
        let mut previous = 0;
        for s in &steps {
            let a = compute_fit_assessment(s);
            assert!(a.enabled_count >= previous);
            previous = a.enabled_count;
        }
        assert_eq!(previous, 5);
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify(0).0, FitLevel::Poor);
        assert_eq!(classify(1).0, FitLevel::Poor);
        assert_eq!(classify(2).0, FitLevel::Minimal);
        assert_eq!(classify(3).0, FitLevel::Good);
        assert_eq!(classify(4).0, FitLevel::Good);
        assert_eq!(classify(5).0, FitLevel::Excellent);
    }

    #[test]
    fn test_assessment_serializes_camel_case() {
        let a = compute_fit_assessment(&make_selections("slack", &["elk"], &[], &[], &[]));
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["level"], "minimal");
        assert_eq!(v["enabledCount"], 2);
        assert_eq!(v["totalCount"], 5);
        assert_eq!(v["canContinue"], true);
        assert_eq!(v["capabilities"][0]["type"], "communication");
    }

    #[tokio::test]
    async fn test_quiz_scorer_delegates_to_compute() {
        let s = make_selections("slack", &["elk"], &[], &[], &[]);
        let scorer = QuizFitScorer;
        assert_eq!(scorer.score(&s).await, compute_fit_assessment(&s));
        assert_eq!(scorer.backend(), "quiz");
    }
}
