use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::db::types::{AssignmentStatus, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) role: UserRole,
    pub(crate) created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FollowUpQuestion {
    pub(crate) id: String,
    pub(crate) question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct BookRecommendation {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) topic: String,
    pub(crate) match_percentage: u8,
}

/// Question id -> the student's answer.
pub(crate) type FollowUpResponses = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Assignment {
    pub(crate) id: i64,
    pub(crate) student_id: i64,
    pub(crate) text: String,
    pub(crate) subject: String,
    pub(crate) followup_questions: Json<Vec<FollowUpQuestion>>,
    pub(crate) student_responses: Json<FollowUpResponses>,
    pub(crate) concept_clarity: f64,
    pub(crate) application: f64,
    pub(crate) logical_consistency: f64,
    pub(crate) depth: f64,
    pub(crate) final_score: f64,
    pub(crate) radar_clarity: f64,
    pub(crate) radar_application: f64,
    pub(crate) radar_logic: f64,
    pub(crate) radar_critical_thinking: f64,
    pub(crate) radar_retention: f64,
    pub(crate) weak_topics: Json<Vec<String>>,
    pub(crate) recommendations: Json<Vec<BookRecommendation>>,
    pub(crate) ai_dependency_score: f64,
    pub(crate) status: AssignmentStatus,
    pub(crate) created_at: OffsetDateTime,
    pub(crate) updated_at: OffsetDateTime,
}
