use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentTeacher;
use crate::core::state::AppState;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::analytics::{ClassAnalyticsResponse, RosterEntry, StudentAnalyticsResponse};
use crate::services::analytics;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/class-analytics", get(class_analytics))
        .route("/students", get(students))
        .route("/student/:student_id", get(student_analytics))
}

async fn class_analytics(
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
) -> Result<Json<ClassAnalyticsResponse>, ApiError> {
    let student_count = repositories::users::count_by_role(state.db(), UserRole::Student)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count students"))?;
    let assignments = repositories::assignments::list_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load assignments"))?;

    let registered = usize::try_from(student_count).unwrap_or_default();
    Ok(Json(analytics::class_analytics(registered, &assignments)))
}

async fn students(
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
) -> Result<Json<Vec<RosterEntry>>, ApiError> {
    let students = repositories::users::list_by_role(state.db(), UserRole::Student)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load students"))?;

    let mut roster = Vec::with_capacity(students.len());
    for student in &students {
        let assignments = repositories::assignments::list_by_student(state.db(), student.id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load assignments"))?;
        roster.push(analytics::roster_entry(student, &assignments));
    }

    Ok(Json(roster))
}

async fn student_analytics(
    CurrentTeacher(_teacher): CurrentTeacher,
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<StudentAnalyticsResponse>, ApiError> {
    let name = repositories::users::find_by_id(state.db(), student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load student"))?
        .map(|user| user.name)
        .unwrap_or_else(|| format!("Student {student_id}"));

    let assignments = repositories::assignments::list_by_student(state.db(), student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load assignments"))?;

    analytics::student_analytics(student_id, name, &assignments)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No assignments found for this student.".to_string()))
}
