use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStudent;
use crate::api::validation::validate_payload;
use crate::core::{metrics, state::AppState, time::now_utc};
use crate::db::models::FollowUpResponses;
use crate::repositories;
use crate::schemas::analytics::DashboardResponse;
use crate::schemas::assignment::{
    AssignmentResultResponse, AssignmentSubmit, FollowUpResponse, FollowUpSubmit,
    SubmissionResponse,
};
use crate::services::{analytics, evaluation};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/submit-assignment", post(submit_assignment))
        .route("/submit-followup", post(submit_followup))
        .route("/dashboard", get(dashboard))
        .route("/results/:assignment_id", get(results))
}

async fn submit_assignment(
    CurrentStudent(student): CurrentStudent,
    State(state): State<AppState>,
    Json(payload): Json<AssignmentSubmit>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    validate_payload(&payload)?;

    let analyzer = state.analyzer();
    let no_responses = FollowUpResponses::new();
    let followup_questions = analyzer.followup_questions(&payload.text).await?;
    let weak_topics = analyzer.extract_weak_topics(&payload.text).await?;
    let dimensions = analyzer.evaluate_understanding(&payload.text, &no_responses).await?;
    let evaluation = evaluation::score_dimensions(&dimensions)?;
    let recommendations = analyzer.recommend_books(&weak_topics).await?;
    let ai_dependency = analyzer.ai_dependency(&payload.text, &no_responses).await?;

    let mut tx = state
        .db()
        .begin()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start transaction"))?;

    let assignment = repositories::assignments::create(
        &mut *tx,
        repositories::assignments::CreateAssignment {
            student_id: student.id,
            text: &payload.text,
            subject: payload.subject.trim(),
            followup_questions: &followup_questions,
            scores: evaluation.scores,
            radar: evaluation.radar,
            weak_topics: &weak_topics,
            recommendations: &recommendations,
            ai_dependency_score: ai_dependency,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to store assignment"))?;

    tx.commit().await.map_err(|e| ApiError::internal(e, "Failed to commit assignment"))?;

    metrics::record_evaluation("submission", evaluation.scores.final_score);
    tracing::info!(
        assignment_id = assignment.id,
        student_id = student.id,
        final_score = evaluation.scores.final_score,
        "Assignment analyzed"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: "Assignment analyzed successfully".to_string(),
            assignment_id: assignment.id,
            followup_questions,
            scores: evaluation.scores,
            radar_scores: evaluation.radar,
            weak_topics,
            recommendations,
            ai_dependency_score: ai_dependency,
        }),
    ))
}

async fn submit_followup(
    CurrentStudent(student): CurrentStudent,
    State(state): State<AppState>,
    Json(payload): Json<FollowUpSubmit>,
) -> Result<Json<FollowUpResponse>, ApiError> {
    let mut tx = state
        .db()
        .begin()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start transaction"))?;

    let assignment = repositories::assignments::find_owned_for_update(
        &mut *tx,
        payload.assignment_id,
        student.id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to load assignment"))?
    .ok_or_else(|| ApiError::NotFound("Assignment not found.".to_string()))?;

    let analyzer = state.analyzer();
    let dimensions = analyzer.evaluate_understanding(&assignment.text, &payload.responses).await?;
    let evaluation = evaluation::score_dimensions(&dimensions)?;
    let ai_dependency = analyzer.ai_dependency(&assignment.text, &payload.responses).await?;

    repositories::assignments::apply_followup(
        &mut *tx,
        assignment.id,
        repositories::assignments::FollowUpUpdate {
            responses: &payload.responses,
            scores: evaluation.scores,
            radar: evaluation.radar,
            ai_dependency_score: ai_dependency,
            updated_at: now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to store follow-up evaluation"))?;

    tx.commit().await.map_err(|e| ApiError::internal(e, "Failed to commit follow-up"))?;

    metrics::record_evaluation("followup", evaluation.scores.final_score);
    tracing::info!(
        assignment_id = assignment.id,
        student_id = student.id,
        responses = payload.responses.len(),
        "Follow-up evaluated"
    );

    Ok(Json(FollowUpResponse {
        message: "Follow-up responses evaluated".to_string(),
        assignment_id: assignment.id,
        scores: evaluation.scores,
        radar_scores: evaluation.radar,
        ai_dependency_score: ai_dependency,
    }))
}

async fn dashboard(
    CurrentStudent(student): CurrentStudent,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let assignments = repositories::assignments::list_by_student(state.db(), student.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load assignments"))?;

    Ok(Json(analytics::student_dashboard(&assignments)))
}

async fn results(
    CurrentStudent(student): CurrentStudent,
    State(state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Json<AssignmentResultResponse>, ApiError> {
    let assignment = repositories::assignments::find_owned(state.db(), assignment_id, student.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load assignment"))?
        .ok_or_else(|| ApiError::NotFound("Assignment not found.".to_string()))?;

    Ok(Json(AssignmentResultResponse::from_db(assignment)))
}
