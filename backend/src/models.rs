use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Site {
    pub id: i64,
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: Option<f64>,
    pub status: String,
    pub max_monthly_mean: Option<f64>,
    pub sensor_id: Option<String>,
    pub video_stream: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSite {
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: Option<f64>,
    pub status: Option<String>,
    pub max_monthly_mean: Option<f64>,
    pub sensor_id: Option<String>,
    pub video_stream: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyData {
    pub id: i64,
    pub site_id: i64,
    pub date: NaiveDate,
    pub min_bottom_temperature: Option<f64>,
    pub max_bottom_temperature: Option<f64>,
    pub avg_bottom_temperature: Option<f64>,
    pub degree_heating_days: Option<f64>,
    pub top_temperature: Option<f64>,
    pub satellite_temperature: Option<f64>,
    pub min_wave_height: Option<f64>,
    pub max_wave_height: Option<f64>,
    pub avg_wave_height: Option<f64>,
    pub wave_mean_direction: Option<i64>,
    pub wave_peak_period: Option<i64>,
    pub wave_mean_period: Option<i64>,
    pub min_wind_speed: Option<f64>,
    pub max_wind_speed: Option<f64>,
    pub avg_wind_speed: Option<f64>,
    pub wind_direction: Option<i64>,
    pub daily_alert_level: Option<i64>,
    pub weekly_alert_level: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One day of metrics for a site. Posting the same date again replaces the
/// previous values for that day.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewDailyData {
    pub date: NaiveDate,
    pub min_bottom_temperature: Option<f64>,
    pub max_bottom_temperature: Option<f64>,
    pub avg_bottom_temperature: Option<f64>,
    pub degree_heating_days: Option<f64>,
    pub top_temperature: Option<f64>,
    pub satellite_temperature: Option<f64>,
    pub min_wave_height: Option<f64>,
    pub max_wave_height: Option<f64>,
    pub avg_wave_height: Option<f64>,
    pub wave_mean_direction: Option<i64>,
    pub wave_peak_period: Option<i64>,
    pub wave_mean_period: Option<i64>,
    pub min_wind_speed: Option<f64>,
    pub max_wind_speed: Option<f64>,
    pub avg_wind_speed: Option<f64>,
    pub wind_direction: Option<i64>,
    pub daily_alert_level: Option<i64>,
    pub weekly_alert_level: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Survey {
    pub id: i64,
    pub site_id: i64,
    pub dive_date: DateTime<Utc>,
    pub weather_conditions: String,
    pub temperature: Option<f64>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSurvey {
    pub dive_date: DateTime<Utc>,
    pub weather_conditions: Option<String>,
    pub temperature: Option<f64>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SurveyMedia {
    pub id: i64,
    pub survey_id: i64,
    pub url: String,
    pub media_type: String,
    pub observations: String,
    pub comments: Option<String>,
    pub featured: bool,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSurveyMedia {
    pub url: String,
    pub media_type: Option<String>,
    pub observations: Option<String>,
    pub comments: Option<String>,
    pub featured: Option<bool>,
    pub hidden: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SurveyDetails {
    #[serde(flatten)]
    pub survey: Survey,
    pub media: Vec<SurveyMedia>,
}
