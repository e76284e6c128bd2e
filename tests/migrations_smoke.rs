use sqlx::Row;

/// `None` when neither `DATABASE_URL` nor `POSTGRES_SERVER` is configured.
fn database_url() -> Option<String> {
    dotenvy::dotenv().ok();

    if let Ok(url) = std::env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return Some(url);
        }
    }

    let server = std::env::var("POSTGRES_SERVER").ok().filter(|s| !s.trim().is_empty())?;
    let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".into());
    let user = std::env::var("POSTGRES_USER").unwrap_or_else(|_| "verilearn".into());
    let password = std::env::var("POSTGRES_PASSWORD").unwrap_or_default();
    let db = std::env::var("POSTGRES_DB").unwrap_or_else(|_| "verilearn_db".into());

    Some(format!("postgresql://{user}:{password}@{server}:{port}/{db}"))
}

#[tokio::test]
async fn migrations_apply_and_schema_matches() -> anyhow::Result<()> {
    let Some(database_url) = database_url() else {
        eprintln!("DATABASE_URL and POSTGRES_SERVER are not set, skipping");
        return Ok(());
    };

    let pool =
        sqlx::postgres::PgPoolOptions::new().max_connections(1).connect(&database_url).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    for table in ["users", "assignments"] {
        let row = sqlx::query("SELECT to_regclass($1)::text").bind(table).fetch_one(&pool).await?;
        let regclass: Option<String> = row.try_get(0)?;
        assert!(regclass.is_some(), "expected table {table} to exist after migrations");
    }

    let labels: Vec<String> = sqlx::query_scalar(
        "SELECT enumlabel::text FROM pg_enum e \
         JOIN pg_type t ON t.oid = e.enumtypid \
         WHERE t.typname = 'assignmentstatus' ORDER BY e.enumsortorder",
    )
    .fetch_all(&pool)
    .await?;
    assert_eq!(labels, vec!["submitted", "analyzed", "completed"]);

    Ok(())
}
