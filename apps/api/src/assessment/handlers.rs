//! Axum route handlers for the Assessment API.

use axum::{extract::State, Json};
use tracing::debug;

use crate::assessment::models::{FitAssessment, Selections};
use crate::errors::ApiJson;
use crate::state::AppState;

/// POST /api/v1/assessment
///
/// Scores a set of quiz answers. Missing fields count as unanswered.
pub async fn handle_assess(
    State(state): State<AppState>,
    ApiJson(mut selections): ApiJson<Selections>,
) -> Json<FitAssessment> {
    if selections.enforce_ecs_requires_aws() {
        debug!("Dropped 'ecs' selection without 'aws'");
    }

    let assessment = state.fit_scorer.score(&selections).await;
    debug!(
        backend = state.fit_scorer.backend(),
        level = assessment.level.as_str(),
        enabled = assessment.enabled_count,
        "Scored selections"
    );

    Json(assessment)
}
