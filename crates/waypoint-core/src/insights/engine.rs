//! Insight Engine - orchestrates projection, drift and insight generation

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::models::{DriftSettings, Goal, GoalStatus, ProgressSnapshot};
use crate::store::GoalStore;
use crate::Result;

use super::drift::DriftClassifier;
use super::projection::calculate_projection;
use super::rate::RateEstimator;
use super::rules::{
    AcceleratingRule, BehindPaceRule, FallingBehindRule, OnTrackRule, ReadyToCompleteRule,
};
use super::types::{DriftSeverity, Insight, InsightKind, InsightsSummary, Projection};

/// Context provided to the engine for one evaluation
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// Evaluation date; every "days remaining" and "expected pace" is relative to it
    pub today: NaiveDate,
    pub config: EngineConfig,
}

impl AnalysisContext {
    pub fn new(today: NaiveDate, config: EngineConfig) -> Self {
        Self { today, config }
    }

    /// Evaluate on a fixed date with default configuration
    pub fn for_date(today: NaiveDate) -> Self {
        Self::new(today, EngineConfig::default())
    }

    /// Evaluate as of the local calendar date
    pub fn today(config: EngineConfig) -> Self {
        Self::new(chrono::Local::now().date_naive(), config)
    }
}

/// Everything a rule may look at for one goal
pub struct GoalAssessment<'a> {
    pub goal: &'a Goal,
    pub projection: &'a Projection,
}

/// Trait for insight rules
pub trait InsightRule: Send + Sync {
    /// Kind of insight this rule produces
    fn kind(&self) -> InsightKind;

    /// Human-readable name, also used as the insight title
    fn name(&self) -> &'static str;

    /// Inspect one goal and produce at most one insight
    fn evaluate(&self, assessment: &GoalAssessment<'_>) -> Option<Insight>;
}

/// Projection and insights for a single goal
#[derive(Debug, Clone)]
pub struct GoalAnalysis {
    pub projection: Projection,
    pub insights: Vec<Insight>,
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new engine with the built-in rules in precedence order
    pub fn new() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(BehindPaceRule));
        engine.register(Box::new(FallingBehindRule));
        engine.register(Box::new(ReadyToCompleteRule));
        engine.register(Box::new(AcceleratingRule));
        engine.register(Box::new(OnTrackRule));

        engine
    }

    /// Create an engine with no rules registered
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    /// Register an insight rule after the existing ones
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Kinds of the registered rules, in evaluation order
    pub fn rule_kinds(&self) -> Vec<InsightKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Run rate estimation, drift classification, projection and rules for one goal
    pub fn analyze_goal(
        &self,
        goal: &Goal,
        history: &[ProgressSnapshot],
        settings: &DriftSettings,
        ctx: &AnalysisContext,
    ) -> GoalAnalysis {
        let estimate = RateEstimator::with_trend_threshold(ctx.config.trend_threshold)
            .estimate(history, goal.current_value);
        let drift = DriftClassifier::with_horizon_days(ctx.config.default_horizon_days)
            .classify(goal, settings, ctx.today);
        let latest_snapshot = history.iter().map(|s| s.date).max();

        let projection = calculate_projection(goal, &estimate, drift, latest_snapshot, ctx.today);

        let assessment = GoalAssessment {
            goal,
            projection: &projection,
        };
        let insights: Vec<Insight> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(&assessment))
            .collect();

        tracing::debug!(
            goal_id = goal.id,
            snapshots = history.len(),
            rate = projection.progress_rate,
            trend = projection.trend.as_str(),
            drift = projection.drift.as_str(),
            insights = insights.len(),
            "Goal analysis complete"
        );

        GoalAnalysis {
            projection,
            insights,
        }
    }

    /// Analyze every active goal and build the aggregate summary
    ///
    /// Goals without an entry in `histories` are analyzed with an empty
    /// history. Insights are ranked most severe first (goal order within a
    /// severity) and capped at `max_insights`; counters and projections
    /// cover every active goal regardless of the cap.
    pub fn generate_summary(
        &self,
        goals: &[Goal],
        histories: &HashMap<i64, Vec<ProgressSnapshot>>,
        settings: &DriftSettings,
        ctx: &AnalysisContext,
    ) -> InsightsSummary {
        let mut summary = InsightsSummary {
            generated_for: ctx.today,
            total_goals: 0,
            on_track: 0,
            at_risk: 0,
            critical: 0,
            completed: 0,
            insights: vec![],
            projections: vec![],
        };

        for goal in goals.iter().filter(|g| g.is_active) {
            let history = histories.get(&goal.id).map(Vec::as_slice).unwrap_or(&[]);
            let analysis = self.analyze_goal(goal, history, settings, ctx);

            tally(&mut summary, goal, &analysis.projection);
            summary.insights.extend(analysis.insights);
            summary.projections.push(analysis.projection);
        }

        // sort_by is stable, so goal order survives within a severity
        summary
            .insights
            .sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));
        summary.insights.truncate(ctx.config.max_insights);

        tracing::info!(
            total = summary.total_goals,
            on_track = summary.on_track,
            at_risk = summary.at_risk,
            critical = summary.critical,
            completed = summary.completed,
            insights = summary.insights.len(),
            "Insights summary generated"
        );

        summary
    }

    /// Fetch everything from a store and build the summary
    ///
    /// A history fetch that fails for one goal is logged and treated as an
    /// empty history. Failing to list goals or load settings is an error.
    pub fn summarize_from_store<S: GoalStore + ?Sized>(
        &self,
        store: &S,
        user_id: &str,
        ctx: &AnalysisContext,
    ) -> Result<InsightsSummary> {
        let goals = store.list_active_goals()?;
        let settings = drift_settings(store, user_id, ctx)?;

        let mut histories = HashMap::with_capacity(goals.len());
        for goal in &goals {
            let history = match store.get_progress_history(goal.id, ctx.config.history_limit) {
                Ok(history) => history,
                Err(e) => {
                    tracing::warn!(
                        goal_id = goal.id,
                        error = %e,
                        "Failed to load progress history, analyzing without it"
                    );
                    vec![]
                }
            };
            histories.insert(goal.id, history);
        }

        Ok(self.generate_summary(&goals, &histories, &settings, ctx))
    }

    /// Fetch one goal's history and the user's settings, then analyze it
    pub fn analyze_from_store<S: GoalStore + ?Sized>(
        &self,
        store: &S,
        goal: &Goal,
        user_id: &str,
        ctx: &AnalysisContext,
    ) -> Result<GoalAnalysis> {
        let history = store.get_progress_history(goal.id, ctx.config.history_limit)?;
        let settings = drift_settings(store, user_id, ctx)?;
        Ok(self.analyze_goal(goal, &history, &settings, ctx))
    }
}

/// The user's stored thresholds, else the configured defaults
fn drift_settings<S: GoalStore + ?Sized>(
    store: &S,
    user_id: &str,
    ctx: &AnalysisContext,
) -> Result<DriftSettings> {
    Ok(store
        .get_stored_drift_settings(user_id)?
        .unwrap_or(ctx.config.default_drift))
}

/// Place a goal into exactly one counter
fn tally(summary: &mut InsightsSummary, goal: &Goal, projection: &Projection) {
    summary.total_goals += 1;

    if goal.status == GoalStatus::Completed || projection.percent_complete >= 100.0 {
        summary.completed += 1;
        return;
    }
    if goal.status == GoalStatus::Paused {
        return;
    }
    match projection.drift {
        DriftSeverity::Critical => summary.critical += 1,
        DriftSeverity::Warning => summary.at_risk += 1,
        DriftSeverity::None => summary.on_track += 1,
    }
}

/// Build a summary with the built-in rules and default configuration
pub fn generate_insights_summary(
    goals: &[Goal],
    histories: &HashMap<i64, Vec<ProgressSnapshot>>,
    settings: &DriftSettings,
    today: NaiveDate,
) -> InsightsSummary {
    InsightEngine::new().generate_summary(goals, histories, settings, &AnalysisContext::for_date(today))
}
