use crate::db::models::User;
use crate::db::types::UserRole;

const COLUMNS: &str = "id, name, email, password_hash, role, created_at";

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn find_by_email(
    executor: impl sqlx::PgExecutor<'_>,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE email = $1"))
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn exists_by_email(
    executor: impl sqlx::PgExecutor<'_>,
    email: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
}

pub(crate) struct CreateUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: String,
    pub role: UserRole,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateUser<'_>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, password_hash, role)
         VALUES ($1, $2, $3, $4)
         RETURNING {COLUMNS}",
    ))
    .bind(params.name)
    .bind(params.email)
    .bind(params.password_hash)
    .bind(params.role)
    .fetch_one(executor)
    .await
}

pub(crate) async fn count_by_role(
    executor: impl sqlx::PgExecutor<'_>,
    role: UserRole,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(role)
        .fetch_one(executor)
        .await
}

/// Ordered by name for the teacher roster.
pub(crate) async fn list_by_role(
    executor: impl sqlx::PgExecutor<'_>,
    role: UserRole,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM users WHERE role = $1 ORDER BY name, id"
    ))
    .bind(role)
    .fetch_all(executor)
    .await
}
