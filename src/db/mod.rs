pub(crate) mod models;
pub(crate) mod types;

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

use crate::core::config::Settings;

pub(crate) async fn init_pool(settings: &Settings) -> Result<PgPool, sqlx::Error> {
    let database = settings.database();
    let mut connect_options: PgConnectOptions = database.database_url().parse()?;

    let statement_level = if database.log_statements {
        tracing::log::LevelFilter::Info
    } else {
        tracing::log::LevelFilter::Off
    };

    connect_options =
        connect_options.application_name("verilearn-api").log_statements(statement_level);

    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await
}

pub(crate) async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
