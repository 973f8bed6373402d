use crate::models::{DailyData, NewDailyData};
use crate::services::{daily_data_service, site_service};
use crate::AppState;
use chrono::NaiveDate;
use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, State};

fn parse_date_param(value: Option<String>) -> Result<Option<NaiveDate>, Status> {
    match value {
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| Status::BadRequest),
        None => Ok(None),
    }
}

#[get("/<site_id>/daily_data?<start>&<end>")]
pub async fn get_daily_data(
    site_id: i64,
    start: Option<String>,
    end: Option<String>,
    state: &State<AppState>,
) -> Result<Json<Vec<DailyData>>, Status> {
    let start = parse_date_param(start)?;
    let end = parse_date_param(end)?;

    match daily_data_service::get_daily_data(&state.pool, site_id, start, end).await {
        Ok(data) => Ok(Json(data)),
        Err(e) => {
            error!("Failed to fetch daily data for site {site_id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[post("/<site_id>/daily_data", data = "<data>")]
pub async fn upsert_daily_data(
    site_id: i64,
    data: Json<NewDailyData>,
    state: &State<AppState>,
) -> Result<Json<DailyData>, Status> {
    match site_service::get_site(&state.pool, site_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(Status::NotFound),
        Err(e) => {
            error!("Failed to fetch site {site_id}: {e:?}");
            return Err(Status::InternalServerError);
        }
    }

    match daily_data_service::upsert_daily_data(&state.pool, site_id, &data.into_inner()).await {
        Ok(row) => Ok(Json(row)),
        Err(e) => {
            error!("Failed to store daily data for site {site_id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}
