use crate::models::{NewSurvey, NewSurveyMedia, Survey, SurveyMedia};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub async fn list_site_surveys(pool: &SqlitePool, site_id: i64) -> Result<Vec<Survey>> {
    let surveys = sqlx::query_as::<_, Survey>(
        "SELECT * FROM surveys WHERE site_id = ? ORDER BY dive_date DESC",
    )
    .bind(site_id)
    .fetch_all(pool)
    .await?;
    Ok(surveys)
}

pub async fn get_survey(pool: &SqlitePool, id: i64) -> Result<Option<Survey>> {
    let survey = sqlx::query_as::<_, Survey>("SELECT * FROM surveys WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(survey)
}

pub async fn create_survey(pool: &SqlitePool, site_id: i64, survey: &NewSurvey) -> Result<Survey> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO surveys (site_id, dive_date, weather_conditions, temperature, comments, \
         created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(site_id)
    .bind(survey.dive_date)
    .bind(survey.weather_conditions.as_deref().unwrap_or("calm"))
    .bind(survey.temperature)
    .bind(&survey.comments)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_survey(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Survey {} missing after insert", id))
}

pub async fn update_survey(pool: &SqlitePool, id: i64, survey: &NewSurvey) -> Result<Option<Survey>> {
    let result = sqlx::query(
        "UPDATE surveys SET dive_date = ?, weather_conditions = ?, temperature = ?, \
         comments = ?, updated_at = ? WHERE id = ?",
    )
    .bind(survey.dive_date)
    .bind(survey.weather_conditions.as_deref().unwrap_or("calm"))
    .bind(survey.temperature)
    .bind(&survey.comments)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_survey(pool, id).await
}

pub async fn delete_survey(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM surveys WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_survey_media_items(pool: &SqlitePool, survey_id: i64) -> Result<Vec<SurveyMedia>> {
    let media = sqlx::query_as::<_, SurveyMedia>(
        "SELECT * FROM survey_media WHERE survey_id = ? ORDER BY featured DESC, id",
    )
    .bind(survey_id)
    .fetch_all(pool)
    .await?;
    Ok(media)
}

pub async fn get_survey_media(pool: &SqlitePool, id: i64) -> Result<Option<SurveyMedia>> {
    let media = sqlx::query_as::<_, SurveyMedia>("SELECT * FROM survey_media WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(media)
}

/// At most one media item per survey is featured; marking a new one featured
/// unmarks the rest.
pub async fn add_survey_media(
    pool: &SqlitePool,
    survey_id: i64,
    media: &NewSurveyMedia,
) -> Result<SurveyMedia> {
    let featured = media.featured.unwrap_or(false);
    if featured {
        clear_featured_media(pool, survey_id).await?;
    }

    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO survey_media (survey_id, url, media_type, observations, comments, \
         featured, hidden, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(survey_id)
    .bind(&media.url)
    .bind(media.media_type.as_deref().unwrap_or("image"))
    .bind(media.observations.as_deref().unwrap_or("no-data"))
    .bind(&media.comments)
    .bind(featured)
    .bind(media.hidden.unwrap_or(false))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_survey_media(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Survey media {} missing after insert", id))
}

pub async fn update_survey_media(
    pool: &SqlitePool,
    id: i64,
    media: &NewSurveyMedia,
) -> Result<Option<SurveyMedia>> {
    let existing = match get_survey_media(pool, id).await? {
        Some(existing) => existing,
        None => return Ok(None),
    };

    let featured = media.featured.unwrap_or(false);
    if featured {
        clear_featured_media(pool, existing.survey_id).await?;
    }

    sqlx::query(
        "UPDATE survey_media SET url = ?, media_type = ?, observations = ?, comments = ?, \
         featured = ?, hidden = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&media.url)
    .bind(media.media_type.as_deref().unwrap_or("image"))
    .bind(media.observations.as_deref().unwrap_or("no-data"))
    .bind(&media.comments)
    .bind(featured)
    .bind(media.hidden.unwrap_or(false))
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    get_survey_media(pool, id).await
}

pub async fn delete_survey_media(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM survey_media WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn clear_featured_media(pool: &SqlitePool, survey_id: i64) -> Result<()> {
    sqlx::query("UPDATE survey_media SET featured = 0 WHERE survey_id = ?")
        .bind(survey_id)
        .execute(pool)
        .await?;
    Ok(())
}
