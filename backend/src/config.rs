use crate::services::stream_check;
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::env;
use std::str::FromStr;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

lazy_static! {
    pub static ref DATABASE_URL: String =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://reefwatch.db?mode=rwc".to_string());
    pub static ref STREAM_CHECK_SCHEDULE: String =
        env::var("STREAM_CHECK_SCHEDULE").unwrap_or_else(|_| "0 0 6 * * *".to_string());
    pub static ref INSTANCE_NAME: String =
        env::var("INSTANCE_NAME").unwrap_or_else(|_| "reefwatch-dev".to_string());
    pub static ref ALLOWED_ORIGIN: String =
        env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub async fn create_db_pool() -> Result<SqlitePool> {
    let db_url = &*DATABASE_URL;
    info!("Connecting to database at: {db_url}");

    let options = SqliteConnectOptions::from_str(db_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub async fn setup_stream_check_scheduler(pool: SqlitePool) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let check_job = Job::new_async(STREAM_CHECK_SCHEDULE.as_str(), move |_uuid, _l| {
        let pool = pool.clone();
        Box::pin(async move {
            stream_check::run_scheduled_check(&pool, INSTANCE_NAME.as_str()).await;
        })
    })?;

    scheduler.add(check_job).await?;
    scheduler.start().await?;
    info!("Video stream check scheduler started.");

    Ok(scheduler)
}

pub async fn create_app_state() -> Result<AppState> {
    let pool = create_db_pool().await?;
    let scheduler = setup_stream_check_scheduler(pool.clone()).await?;

    Ok(AppState {
        pool,
        scheduler: Mutex::new(scheduler),
    })
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[ALLOWED_ORIGIN.as_str()]))
        .allowed_methods(
            vec![
                Method::Get,
                Method::Post,
                Method::Put,
                Method::Delete,
                Method::Options,
            ]
            .into_iter()
            .map(From::from)
            .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&[
            "Authorization",
            "Accept",
            "Content-Type",
        ]))
        .allow_credentials(true)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
