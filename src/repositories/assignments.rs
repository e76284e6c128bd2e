use sqlx::types::Json;

use crate::db::models::{Assignment, BookRecommendation, FollowUpQuestion, FollowUpResponses};
use crate::db::types::AssignmentStatus;
use crate::services::scoring::{RadarScores, ScoreBreakdown};

const COLUMNS: &str = "\
    id, student_id, text, subject, followup_questions, student_responses, \
    concept_clarity, application, logical_consistency, depth, final_score, \
    radar_clarity, radar_application, radar_logic, radar_critical_thinking, radar_retention, \
    weak_topics, recommendations, ai_dependency_score, status, created_at, updated_at";

pub(crate) struct CreateAssignment<'a> {
    pub student_id: i64,
    pub text: &'a str,
    pub subject: &'a str,
    pub followup_questions: &'a [FollowUpQuestion],
    pub scores: ScoreBreakdown,
    pub radar: RadarScores,
    pub weak_topics: &'a [String],
    pub recommendations: &'a [BookRecommendation],
    pub ai_dependency_score: f64,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateAssignment<'_>,
) -> Result<Assignment, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "INSERT INTO assignments (
            student_id, text, subject, followup_questions, student_responses,
            concept_clarity, application, logical_consistency, depth, final_score,
            radar_clarity, radar_application, radar_logic, radar_critical_thinking, radar_retention,
            weak_topics, recommendations, ai_dependency_score, status
        ) VALUES ($1,$2,$3,$4,'{{}}'::jsonb,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18)
        RETURNING {COLUMNS}",
    ))
    .bind(params.student_id)
    .bind(params.text)
    .bind(params.subject)
    .bind(Json(params.followup_questions))
    .bind(params.scores.concept_clarity)
    .bind(params.scores.application)
    .bind(params.scores.logical_consistency)
    .bind(params.scores.depth)
    .bind(params.scores.final_score)
    .bind(params.radar.clarity)
    .bind(params.radar.application)
    .bind(params.radar.logic)
    .bind(params.radar.critical_thinking)
    .bind(params.radar.retention)
    .bind(Json(params.weak_topics))
    .bind(Json(params.recommendations))
    .bind(params.ai_dependency_score)
    .bind(AssignmentStatus::Analyzed)
    .fetch_one(executor)
    .await
}

/// Only returns the row when it belongs to `student_id`.
pub(crate) async fn find_owned(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
    student_id: i64,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments WHERE id = $1 AND student_id = $2"
    ))
    .bind(id)
    .bind(student_id)
    .fetch_optional(executor)
    .await
}

/// Same as [`find_owned`] but locks the row for the rest of the transaction.
pub(crate) async fn find_owned_for_update(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
    student_id: i64,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments WHERE id = $1 AND student_id = $2 FOR UPDATE"
    ))
    .bind(id)
    .bind(student_id)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn list_by_student(
    executor: impl sqlx::PgExecutor<'_>,
    student_id: i64,
) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments WHERE student_id = $1 ORDER BY created_at, id"
    ))
    .bind(student_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn list_all(
    executor: impl sqlx::PgExecutor<'_>,
) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments ORDER BY created_at, id"
    ))
    .fetch_all(executor)
    .await
}

pub(crate) struct FollowUpUpdate<'a> {
    pub responses: &'a FollowUpResponses,
    pub scores: ScoreBreakdown,
    pub radar: RadarScores,
    pub ai_dependency_score: f64,
    pub updated_at: time::OffsetDateTime,
}

/// Stores the re-evaluation and marks the assignment completed.
pub(crate) async fn apply_followup(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
    params: FollowUpUpdate<'_>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE assignments
         SET student_responses = $1,
             concept_clarity = $2,
             application = $3,
             logical_consistency = $4,
             depth = $5,
             final_score = $6,
             radar_clarity = $7,
             radar_application = $8,
             radar_logic = $9,
             radar_critical_thinking = $10,
             radar_retention = $11,
             ai_dependency_score = $12,
             status = $13,
             updated_at = $14
         WHERE id = $15",
    )
    .bind(Json(params.responses))
    .bind(params.scores.concept_clarity)
    .bind(params.scores.application)
    .bind(params.scores.logical_consistency)
    .bind(params.scores.depth)
    .bind(params.scores.final_score)
    .bind(params.radar.clarity)
    .bind(params.radar.application)
    .bind(params.radar.logic)
    .bind(params.radar.critical_thinking)
    .bind(params.radar.retention)
    .bind(params.ai_dependency_score)
    .bind(AssignmentStatus::Completed)
    .bind(params.updated_at)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(())
}
