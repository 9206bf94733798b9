use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::models::{FitAssessment, FitSummary, Selections};

/// The closed set of "what brings you here" options on the contact screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeedId {
    NoisyAlerts,
    SlowRca,
    CrossTeam,
    SreAgent,
    Other,
}

impl NeedId {
    /// Checklist order.
    pub const ALL: [NeedId; 5] = [
        NeedId::NoisyAlerts,
        NeedId::SlowRca,
        NeedId::CrossTeam,
        NeedId::SreAgent,
        NeedId::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NeedId::NoisyAlerts => "noisy-alerts",
            NeedId::SlowRca => "slow-rca",
            NeedId::CrossTeam => "cross-team",
            NeedId::SreAgent => "sre-agent",
            NeedId::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NeedId::NoisyAlerts => "Too many alerts / noisy alerts",
            NeedId::SlowRca => "Slow RCA process",
            NeedId::CrossTeam => "Cross-team incidents",
            NeedId::SreAgent => "We use coding agents and want to explore an SRE agent",
            NeedId::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Need {
    pub id: NeedId,
    pub label: String,
}

impl From<NeedId> for Need {
    fn from(id: NeedId) -> Self {
        Need {
            id,
            label: id.label().to_string(),
        }
    }
}

/// Current state of the contact screen inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub needs: Vec<NeedId>,
    pub comments: String,
    pub terms_accepted: bool,
}

impl ContactForm {
    /// Checked needs in checklist order, each at most once.
    pub fn checked_needs(&self) -> Vec<Need> {
        NeedId::ALL
            .iter()
            .filter(|id| self.needs.contains(id))
            .map(|&id| Need::from(id))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionMeta {
    /// ISO-8601, UTC, millisecond precision.
    pub submitted_at: String,
    pub page: String,
}

/// Body posted to the relay when the visitor books a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub needs: Vec<Need>,
    pub comments: String,
    pub terms_accepted: bool,
    pub selections: Selections,
    pub fit: FitSummary,
    pub meta: SubmissionMeta,
}

impl ContactPayload {
    pub fn build(
        form: &ContactForm,
        selections: &Selections,
        assessment: &FitAssessment,
        submitted_at: DateTime<Utc>,
        page: &str,
    ) -> Self {
        ContactPayload {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            needs: form.checked_needs(),
            comments: form.comments.trim().to_string(),
            terms_accepted: form.terms_accepted,
            selections: selections.clone(),
            fit: FitSummary::from(assessment),
            meta: SubmissionMeta {
                submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                page: page.to_string(),
            },
        }
    }
}
