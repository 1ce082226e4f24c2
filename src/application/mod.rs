//! Application layer: Use cases and services.
//!
//! This module orchestrates the rule engine with the scan classifier port
//! and renders the results for display.

mod assessment;
mod report;

pub use assessment::{Assessment, AssessmentService};
pub use report::render_text;
