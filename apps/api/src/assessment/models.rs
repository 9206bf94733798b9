use serde::{Deserialize, Serialize};

/// Field names of the five selection input groups.
pub const FIELD_COMMUNICATION: &str = "communication";
pub const FIELD_LOGS: &str = "logs";
pub const FIELD_INFRASTRUCTURE: &str = "infrastructure";
pub const FIELD_CODE: &str = "code";
pub const FIELD_METRICS: &str = "metrics";

/// Code option meaning "we can't give you code access".
pub const NO_CODE: &str = "no-code";
/// The communication option that unlocks automatic alert intake.
pub const SLACK: &str = "slack";
/// Infrastructure options with dependent visibility: `ecs` is only offered under `aws`.
pub const INFRA_AWS: &str = "aws";
pub const INFRA_ECS: &str = "ecs";

/// Raw quiz answers, one entry per checked input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selections {
    /// Single-select; empty means unset.
    pub communication: String,
    pub logs: Vec<String>,
    pub infrastructure: Vec<String>,
    pub code: Vec<String>,
    pub metrics: Vec<String>,
}

impl Selections {
    /// Builds selections from `(input name, value)` pairs of checked inputs.
    /// Unknown names are ignored; for the radio group the last checked value wins.
    pub fn from_checked_inputs<'a, I>(checked: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut selections = Selections::default();
        for (name, value) in checked {
            match name {
                FIELD_COMMUNICATION => selections.communication = value.trim().to_string(),
                FIELD_LOGS => selections.logs.push(value.to_string()),
                FIELD_INFRASTRUCTURE => selections.infrastructure.push(value.to_string()),
                FIELD_CODE => selections.code.push(value.to_string()),
                FIELD_METRICS => selections.metrics.push(value.to_string()),
                _ => {}
            }
        }
        selections
    }

    /// True when nothing has been answered yet.
    pub fn is_untouched(&self) -> bool {
        self.communication.is_empty()
            && self.logs.is_empty()
            && self.infrastructure.is_empty()
            && self.code.is_empty()
            && self.metrics.is_empty()
    }

    pub fn shows_ecs_option(&self) -> bool {
        self.infrastructure.iter().any(|v| v == INFRA_AWS)
    }

    /// Drops a checked `ecs` when `aws` is not selected. Returns whether anything was removed.
    pub fn enforce_ecs_requires_aws(&mut self) -> bool {
        if self.shows_ecs_option() {
            return false;
        }
        let before = self.infrastructure.len();
        self.infrastructure.retain(|v| v != INFRA_ECS);
        before != self.infrastructure.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Communication,
    Logs,
    Metrics,
    Infrastructure,
    Code,
}

impl CapabilityKind {
    /// Display order of the capability list.
    pub const ALL: [CapabilityKind; 5] = [
        CapabilityKind::Communication,
        CapabilityKind::Logs,
        CapabilityKind::Metrics,
        CapabilityKind::Infrastructure,
        CapabilityKind::Code,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    #[serde(rename = "type")]
    pub kind: CapabilityKind,
    pub enabled: bool,
    pub label: String,
    pub description: String,
}

/// Ordered fit classification. `Initial` only ever comes from untouched selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitLevel {
    Initial,
    Poor,
    Minimal,
    Good,
    Excellent,
}

impl FitLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitLevel::Initial => "initial",
            FitLevel::Poor => "poor",
            FitLevel::Minimal => "minimal",
            FitLevel::Good => "good",
            FitLevel::Excellent => "excellent",
        }
    }
}

/// Flattened assessment as the widget consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitAssessment {
    pub level: FitLevel,
    pub title: String,
    pub description: String,
    pub capabilities: Vec<Capability>,
    pub can_continue: bool,
    pub enabled_count: usize,
    pub total_count: usize,
}

/// The `fit` block carried by a contact submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitSummary {
    pub level: FitLevel,
    pub enabled_count: usize,
    pub total_count: usize,
}

impl From<&FitAssessment> for FitSummary {
    fn from(a: &FitAssessment) -> Self {
        FitSummary {
            level: a.level,
            enabled_count: a.enabled_count,
            total_count: a.total_count,
        }
    }
}
