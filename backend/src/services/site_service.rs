use crate::models::{NewSite, Site};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub async fn list_sites(pool: &SqlitePool) -> Result<Vec<Site>> {
    let sites = sqlx::query_as::<_, Site>("SELECT * FROM sites ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(sites)
}

pub async fn get_site(pool: &SqlitePool, id: i64) -> Result<Option<Site>> {
    let site = sqlx::query_as::<_, Site>("SELECT * FROM sites WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(site)
}

/// All sites that have a live video stream configured. This is the candidate
/// set for the scheduled stream check.
pub async fn get_sites_with_stream(pool: &SqlitePool) -> Result<Vec<Site>> {
    let sites = sqlx::query_as::<_, Site>("SELECT * FROM sites WHERE video_stream IS NOT NULL")
        .fetch_all(pool)
        .await?;
    Ok(sites)
}

pub async fn create_site(pool: &SqlitePool, new_site: &NewSite) -> Result<Site> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO sites (name, latitude, longitude, depth, status, max_monthly_mean, \
         sensor_id, video_stream, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&new_site.name)
    .bind(new_site.latitude)
    .bind(new_site.longitude)
    .bind(new_site.depth)
    .bind(new_site.status.as_deref().unwrap_or("in_review"))
    .bind(new_site.max_monthly_mean)
    .bind(&new_site.sensor_id)
    .bind(&new_site.video_stream)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_site(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Site {} missing after insert", id))
}

pub async fn update_site(pool: &SqlitePool, id: i64, site: &NewSite) -> Result<Option<Site>> {
    let result = sqlx::query(
        "UPDATE sites SET name = ?, latitude = ?, longitude = ?, depth = ?, status = ?, \
         max_monthly_mean = ?, sensor_id = ?, video_stream = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&site.name)
    .bind(site.latitude)
    .bind(site.longitude)
    .bind(site.depth)
    .bind(site.status.as_deref().unwrap_or("in_review"))
    .bind(site.max_monthly_mean)
    .bind(&site.sensor_id)
    .bind(&site.video_stream)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_site(pool, id).await
}

pub async fn delete_site(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM sites WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
