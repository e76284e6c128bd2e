use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_rfc3339;
use crate::db::models::{Assignment, BookRecommendation, FollowUpQuestion, FollowUpResponses};
use crate::db::types::AssignmentStatus;
use crate::services::scoring::{RadarScores, ScoreBreakdown};

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AssignmentSubmit {
    #[validate(length(min = 20, message = "text must be at least 20 characters"))]
    pub(crate) text: String,
    #[serde(default = "default_subject")]
    #[validate(length(max = 100, message = "subject must be at most 100 characters"))]
    pub(crate) subject: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FollowUpSubmit {
    pub(crate) assignment_id: i64,
    pub(crate) responses: FollowUpResponses,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionResponse {
    pub(crate) message: String,
    pub(crate) assignment_id: i64,
    pub(crate) followup_questions: Vec<FollowUpQuestion>,
    pub(crate) scores: ScoreBreakdown,
    pub(crate) radar_scores: RadarScores,
    pub(crate) weak_topics: Vec<String>,
    pub(crate) recommendations: Vec<BookRecommendation>,
    pub(crate) ai_dependency_score: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct FollowUpResponse {
    pub(crate) message: String,
    pub(crate) assignment_id: i64,
    pub(crate) scores: ScoreBreakdown,
    pub(crate) radar_scores: RadarScores,
    pub(crate) ai_dependency_score: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentResultResponse {
    pub(crate) assignment_id: i64,
    pub(crate) subject: String,
    pub(crate) status: AssignmentStatus,
    pub(crate) scores: ScoreBreakdown,
    pub(crate) radar_scores: RadarScores,
    pub(crate) weak_topics: Vec<String>,
    pub(crate) recommendations: Vec<BookRecommendation>,
    pub(crate) followup_questions: Vec<FollowUpQuestion>,
    pub(crate) student_responses: FollowUpResponses,
    pub(crate) ai_dependency_score: f64,
    pub(crate) created_at: String,
}

impl AssignmentResultResponse {
    pub(crate) fn from_db(assignment: Assignment) -> Self {
        Self {
            assignment_id: assignment.id,
            scores: stored_scores(&assignment),
            radar_scores: stored_radar(&assignment),
            subject: assignment.subject,
            status: assignment.status,
            weak_topics: assignment.weak_topics.0,
            recommendations: assignment.recommendations.0,
            followup_questions: assignment.followup_questions.0,
            student_responses: assignment.student_responses.0,
            ai_dependency_score: assignment.ai_dependency_score,
            created_at: format_rfc3339(assignment.created_at),
        }
    }
}

/// Scores exactly as persisted; they were rounded when written.
pub(crate) fn stored_scores(assignment: &Assignment) -> ScoreBreakdown {
    ScoreBreakdown {
        concept_clarity: assignment.concept_clarity,
        application: assignment.application,
        logical_consistency: assignment.logical_consistency,
        depth: assignment.depth,
        final_score: assignment.final_score,
    }
}

pub(crate) fn stored_radar(assignment: &Assignment) -> RadarScores {
    RadarScores {
        clarity: assignment.radar_clarity,
        application: assignment.radar_application,
        logic: assignment.radar_logic,
        critical_thinking: assignment.radar_critical_thinking,
        retention: assignment.radar_retention,
    }
}

fn default_subject() -> String {
    "General".to_string()
}
