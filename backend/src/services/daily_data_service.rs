use crate::models::{DailyData, NewDailyData};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

pub async fn get_daily_data(
    pool: &SqlitePool,
    site_id: i64,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<DailyData>> {
    let rows = sqlx::query_as::<_, DailyData>(
        "SELECT * FROM daily_data WHERE site_id = ? \
         AND (? IS NULL OR date >= ?) AND (? IS NULL OR date <= ?) \
         ORDER BY date",
    )
    .bind(site_id)
    .bind(start)
    .bind(start)
    .bind(end)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert one day of metrics, replacing any previous row for the same site
/// and date.
pub async fn upsert_daily_data(
    pool: &SqlitePool,
    site_id: i64,
    data: &NewDailyData,
) -> Result<DailyData> {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO daily_data (site_id, date, \
         min_bottom_temperature, max_bottom_temperature, avg_bottom_temperature, \
         degree_heating_days, top_temperature, satellite_temperature, \
         min_wave_height, max_wave_height, avg_wave_height, \
         wave_mean_direction, wave_peak_period, wave_mean_period, \
         min_wind_speed, max_wind_speed, avg_wind_speed, wind_direction, \
         daily_alert_level, weekly_alert_level, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT (site_id, date) DO UPDATE SET \
         min_bottom_temperature = excluded.min_bottom_temperature, \
         max_bottom_temperature = excluded.max_bottom_temperature, \
         avg_bottom_temperature = excluded.avg_bottom_temperature, \
         degree_heating_days = excluded.degree_heating_days, \
         top_temperature = excluded.top_temperature, \
         satellite_temperature = excluded.satellite_temperature, \
         min_wave_height = excluded.min_wave_height, \
         max_wave_height = excluded.max_wave_height, \
         avg_wave_height = excluded.avg_wave_height, \
         wave_mean_direction = excluded.wave_mean_direction, \
         wave_peak_period = excluded.wave_peak_period, \
         wave_mean_period = excluded.wave_mean_period, \
         min_wind_speed = excluded.min_wind_speed, \
         max_wind_speed = excluded.max_wind_speed, \
         avg_wind_speed = excluded.avg_wind_speed, \
         wind_direction = excluded.wind_direction, \
         daily_alert_level = excluded.daily_alert_level, \
         weekly_alert_level = excluded.weekly_alert_level, \
         updated_at = excluded.updated_at",
    )
    .bind(site_id)
    .bind(data.date)
    .bind(data.min_bottom_temperature)
    .bind(data.max_bottom_temperature)
    .bind(data.avg_bottom_temperature)
    .bind(data.degree_heating_days)
    .bind(data.top_temperature)
    .bind(data.satellite_temperature)
    .bind(data.min_wave_height)
    .bind(data.max_wave_height)
    .bind(data.avg_wave_height)
    .bind(data.wave_mean_direction)
    .bind(data.wave_peak_period)
    .bind(data.wave_mean_period)
    .bind(data.min_wind_speed)
    .bind(data.max_wind_speed)
    .bind(data.avg_wind_speed)
    .bind(data.wind_direction)
    .bind(data.daily_alert_level)
    .bind(data.weekly_alert_level)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, DailyData>(
        "SELECT * FROM daily_data WHERE site_id = ? AND date = ?",
    )
    .bind(site_id)
    .bind(data.date)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
