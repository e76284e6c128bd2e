use serde::Serialize;

use crate::services::recommendations::{
    InterventionSuggestion, PerformanceDistribution, TopicAverage, WeakTopicCount,
};
use crate::services::scoring::RadarScores;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ScorePoint {
    pub(crate) date: String,
    pub(crate) score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DailyAverage {
    pub(crate) date: String,
    pub(crate) avg: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TopicTimelineEntry {
    pub(crate) week: String,
    pub(crate) topics: String,
    pub(crate) detail: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) overall_score: f64,
    pub(crate) total_assignments: usize,
    pub(crate) score_history: Vec<ScorePoint>,
    pub(crate) weak_topic_summary: Vec<WeakTopicCount>,
    pub(crate) ai_dependency_score: f64,
    pub(crate) growth_trend: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassAnalyticsResponse {
    pub(crate) class_average: f64,
    pub(crate) total_students: usize,
    pub(crate) most_weak_topic: String,
    pub(crate) strongest_topic: String,
    pub(crate) performance_distribution: PerformanceDistribution,
    pub(crate) score_trend: Vec<DailyAverage>,
    pub(crate) topic_averages: Vec<TopicAverage>,
    pub(crate) ai_risk_students: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct StudentAnalyticsResponse {
    pub(crate) student_id: i64,
    pub(crate) student_name: String,
    pub(crate) overall_score: f64,
    pub(crate) growth_trend: f64,
    pub(crate) ai_dependency_score: f64,
    pub(crate) score_history: Vec<ScorePoint>,
    pub(crate) radar_scores: RadarScores,
    pub(crate) weak_topics: Vec<String>,
    pub(crate) topic_timeline: Vec<TopicTimelineEntry>,
    pub(crate) intervention_suggestions: Vec<InterventionSuggestion>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterEntry {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) score: f64,
    pub(crate) weak_topic: String,
    pub(crate) trend: String,
    pub(crate) status: String,
    pub(crate) ai_dependency: f64,
}
