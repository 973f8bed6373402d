#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;
mod utils;

use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tokio_cron_scheduler::JobScheduler;

pub struct AppState {
    pub pool: SqlitePool,
    pub scheduler: Mutex<JobScheduler>,
}

#[launch]
async fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    let state = config::create_app_state()
        .await
        .expect("Application state setup failed.");
    let cors = config::create_cors().expect("CORS setup failed.");

    rocket::build()
        .manage(state)
        .attach(cors)
        .mount(
            "/sites",
            routes![
                api::list_sites,
                api::get_site,
                api::create_site,
                api::update_site,
                api::delete_site,
                api::check_streams,
                api::get_daily_data,
                api::upsert_daily_data,
                api::list_site_surveys,
                api::create_survey,
            ],
        )
        .mount(
            "/surveys",
            routes![
                api::get_survey,
                api::update_survey,
                api::delete_survey,
                api::list_survey_media,
                api::add_survey_media,
            ],
        )
        .mount("/media", routes![api::update_media, api::delete_media])
}
