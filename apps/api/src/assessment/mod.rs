// Quiz assessment: selections model and the fit scorer.
// The scorer is pure; the HTTP handler only wraps it.

pub mod handlers;
pub mod models;
pub mod scoring;
