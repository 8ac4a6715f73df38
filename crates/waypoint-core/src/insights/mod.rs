//! Goal Projection & Insight Engine
//!
//! Turns a sparse, irregular history of progress snapshots into a
//! completion-date forecast, a drift classification and a ranked list of
//! insights with suggested actions. Everything here is a pure function of
//! the goal, its history, the user's drift settings and an evaluation date.
//!
//! ## Components
//!
//! - **Rate Estimator** - per-day progress rate and trend
//! - **Drift Classifier** - expected vs actual pace
//! - **Projection Calculator** - completion date, shortfall, required rate
//! - **Insight Engine** - pluggable rules, counters and ranking
//! - **What-If Simulator** - completion date under an extra monthly amount
//!
//! ## Usage
//!
//! ```rust,ignore
//! use waypoint_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::today(EngineConfig::load()?);
//! let summary = engine.summarize_from_store(&db, "local", &ctx)?;
//! ```

pub mod drift;
pub mod engine;
pub mod projection;
pub mod rate;
pub mod rules;
pub mod types;
pub mod what_if;

pub use drift::DriftClassifier;
pub use engine::{
    generate_insights_summary, AnalysisContext, GoalAnalysis, GoalAssessment, InsightEngine,
    InsightRule,
};
pub use projection::{calculate_projection, completion_date};
pub use rate::{RateEstimator, DAYS_PER_MONTH};
pub use rules::{
    AcceleratingRule, BehindPaceRule, FallingBehindRule, OnTrackRule, ReadyToCompleteRule,
};
pub use types::{
    ActionKind, DriftSeverity, Insight, InsightAction, InsightKind, InsightsSummary, Projection,
    RateEstimate, Severity, Trend, WhatIfResult,
};
pub use what_if::calculate_what_if;
