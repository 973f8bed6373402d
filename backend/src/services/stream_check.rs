use crate::models::Site;
use crate::services::site_service;
use crate::services::slack::{self, SlackBlock, SlackMessage};
use crate::utils::{extract_youtube_video_id, site_frontend_url};
use anyhow::{Context, Result};
use log::{error, info};
use reqwest::Client;
use serde::Deserialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::env;

// The YouTube videos endpoint accepts at most 50 ids per request.
const VIDEO_BATCH_SIZE: usize = 50;

/// Everything the stream check needs from the environment, validated once
/// before a run starts. A missing value aborts the whole run; there is no
/// partial audit.
#[derive(Debug)]
pub struct StreamCheckConfig {
    pub youtube_api_key: String,
    pub slack_bot_token: String,
    pub slack_channel: String,
    pub front_end_url: String,
}

impl StreamCheckConfig {
    pub fn from_env() -> Result<Self> {
        Ok(StreamCheckConfig {
            youtube_api_key: require_env("YOUTUBE_API_KEY")?,
            slack_bot_token: require_env("SLACK_BOT_TOKEN")?,
            slack_channel: require_env("SLACK_BOT_CHANNEL")?,
            front_end_url: require_env("FRONT_END_BASE_URL")?,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("No {} was defined", name))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    Private,
    Public,
    Unlisted,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Deleted,
    Failed,
    Processed,
    Rejected,
    Uploaded,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub privacy_status: PrivacyStatus,
    pub embeddable: bool,
    pub upload_status: UploadStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStreamingDetails {
    pub actual_start_time: Option<String>,
    pub actual_end_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeVideoItem {
    pub id: String,
    pub status: VideoStatus,
    pub live_streaming_details: Option<LiveStreamingDetails>,
}

#[derive(Debug, Deserialize)]
struct YouTubeApiResponse {
    #[serde(default)]
    items: Vec<YouTubeVideoItem>,
}

/// One site with a configured stream, after local URL parsing.
#[derive(Debug, Clone)]
struct VideoStreamDetails {
    site_id: i64,
    name: Option<String>,
    video_id: Option<String>,
    url: String,
    error: Option<String>,
}

/// The per-site outcome of a check run. A finding without a reason is
/// healthy and is left out of the alert.
#[derive(Debug, Clone)]
struct StreamCheckFinding {
    site_id: i64,
    name: Option<String>,
    url: String,
    reason: Option<String>,
}

/// Scheduler entry point: validates the configuration, then runs the check
/// and logs any failure. Never panics the job runner.
pub async fn run_scheduled_check(pool: &SqlitePool, instance: &str) {
    let config = match StreamCheckConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Video stream check aborted: {e}");
            return;
        }
    };

    if let Err(e) = check_video_streams(pool, &config, instance).await {
        error!("Video stream check failed: {e:?}");
    }
}

/// Check every site with a configured video stream against the YouTube Data
/// API and post a single consolidated Slack alert if any stream is broken.
pub async fn check_video_streams(
    pool: &SqlitePool,
    config: &StreamCheckConfig,
    instance: &str,
) -> Result<()> {
    let sites = site_service::get_sites_with_stream(pool).await?;
    info!("Checking video streams of {} sites...", sites.len());

    let candidates = build_candidates(&sites);
    let video_ids: Vec<String> = candidates
        .iter()
        .filter_map(|details| details.video_id.clone())
        .collect();

    let client = Client::new();
    let items = fetch_video_details(&client, &video_ids, &config.youtube_api_key)
        .await
        .context("Failed to fetch video details from the YouTube API")?;

    // Ids missing from the response stay out of this map and are reported
    // as non-existent videos.
    let remote_errors: HashMap<String, Option<String>> = items
        .iter()
        .map(|item| (item.id.clone(), classify_video(item)))
        .collect();

    let findings = resolve_findings(candidates, &remote_errors);

    let message = match build_alert_message(&findings, instance, &config.slack_channel, &config.front_end_url)
    {
        Some(message) => message,
        None => {
            info!("All {} video streams are healthy", findings.len());
            return Ok(());
        }
    };

    info!(
        "Reporting irregular video streams: {}",
        serde_json::to_string(&message)?
    );
    slack::send_slack_message(&message, &config.slack_bot_token).await?;
    Ok(())
}

fn build_candidates(sites: &[Site]) -> Vec<VideoStreamDetails> {
    sites
        .iter()
        .map(|site| {
            let url = site.video_stream.clone().unwrap_or_default();
            let video_id = extract_youtube_video_id(&url);
            let error = match video_id {
                Some(_) => None,
                None => Some("Video stream URL is invalid".to_string()),
            };
            VideoStreamDetails {
                site_id: site.id,
                name: site.name.clone(),
                video_id,
                url,
                error,
            }
        })
        .collect()
}

async fn fetch_video_details(
    client: &Client,
    video_ids: &[String],
    api_key: &str,
) -> Result<Vec<YouTubeVideoItem>> {
    let mut items = Vec::new();

    for batch in video_ids.chunks(VIDEO_BATCH_SIZE) {
        let ids = batch.join(",");
        let response = client
            .get("https://www.googleapis.com/youtube/v3/videos")
            .query(&[
                ("key", api_key),
                ("id", ids.as_str()),
                ("part", "status,liveStreamingDetails"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<YouTubeApiResponse>()
            .await?;
        items.extend(response.items);
    }

    Ok(items)
}

/// Classify one video returned by the YouTube API. The first matching rule
/// wins; a healthy live stream yields no reason.
fn classify_video(item: &YouTubeVideoItem) -> Option<String> {
    if item.status.privacy_status == PrivacyStatus::Private {
        return Some("Video is not public".to_string());
    }

    if !matches!(
        item.status.upload_status,
        UploadStatus::Uploaded | UploadStatus::Processed
    ) {
        return Some("Video is no longer available".to_string());
    }

    if !item.status.embeddable {
        return Some("Video is not embeddable".to_string());
    }

    let details = match &item.live_streaming_details {
        Some(details) => details,
        None => return Some("Video is not a live stream".to_string()),
    };

    if details.actual_end_time.is_some() {
        return Some("The live stream has ended".to_string());
    }

    if details.actual_start_time.is_none() {
        return Some("The live stream has not started yet".to_string());
    }

    None
}

fn resolve_findings(
    candidates: Vec<VideoStreamDetails>,
    remote_errors: &HashMap<String, Option<String>>,
) -> Vec<StreamCheckFinding> {
    candidates
        .into_iter()
        .map(|candidate| {
            let reason = if let Some(local) = candidate.error.clone() {
                Some(local)
            } else if let Some(id) = candidate.video_id.as_deref() {
                match remote_errors.get(id) {
                    Some(remote) => remote.clone(),
                    None => Some("Video does not exist".to_string()),
                }
            } else {
                // Extraction failure always sets the local error, so this
                // arm is never reached for well-formed candidates.
                Some("Video stream URL is invalid".to_string())
            };

            StreamCheckFinding {
                site_id: candidate.site_id,
                name: candidate.name,
                url: candidate.url,
                reason,
            }
        })
        .collect()
}

/// Compose the alert for all unhealthy findings, or nothing when every
/// stream checks out.
fn build_alert_message(
    findings: &[StreamCheckFinding],
    instance: &str,
    channel: &str,
    front_url: &str,
) -> Option<SlackMessage> {
    let blocks: Vec<SlackBlock> = findings
        .iter()
        .filter_map(|finding| {
            let reason = finding.reason.as_ref()?;
            Some(SlackBlock::section(format!(
                "*Site*: {} - {}\n*Video*: {}\n*Error*: {}",
                finding.name.as_deref().unwrap_or("Unnamed site"),
                site_frontend_url(finding.site_id, front_url),
                finding.url,
                reason
            )))
        })
        .collect();

    if blocks.is_empty() {
        return None;
    }

    let mut message_blocks = vec![
        SlackBlock::section(format!(
            "Scheduled check of video streams in *{instance}* instance"
        )),
        SlackBlock::Divider,
    ];
    message_blocks.extend(blocks);

    Some(SlackMessage {
        channel: channel.to_string(),
        blocks: message_blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn site(id: i64, name: &str, video_stream: Option<&str>) -> Site {
        Site {
            id,
            name: Some(name.to_string()),
            latitude: 0.0,
            longitude: 0.0,
            depth: None,
            status: "deployed".to_string(),
            max_monthly_mean: None,
            sensor_id: None,
            video_stream: video_stream.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn live_item(id: &str) -> YouTubeVideoItem {
        YouTubeVideoItem {
            id: id.to_string(),
            status: VideoStatus {
                privacy_status: PrivacyStatus::Public,
                embeddable: true,
                upload_status: UploadStatus::Uploaded,
            },
            live_streaming_details: Some(LiveStreamingDetails {
                actual_start_time: Some("2026-08-01T00:00:00Z".to_string()),
                actual_end_time: None,
            }),
        }
    }

    #[test]
    fn invalid_urls_get_a_local_error_and_no_video_id() {
        let sites = vec![
            site(1, "Bad URL", Some("not a stream link")),
            site(2, "Good URL", Some("https://youtu.be/abcdefghijk")),
        ];

        let candidates = build_candidates(&sites);
        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0].error.as_deref(),
            Some("Video stream URL is invalid")
        );
        assert!(candidates[0].video_id.is_none());
        assert_eq!(candidates[1].video_id.as_deref(), Some("abcdefghijk"));
        assert!(candidates[1].error.is_none());

        let ids: Vec<String> = candidates
            .iter()
            .filter_map(|c| c.video_id.clone())
            .collect();
        assert_eq!(ids, vec!["abcdefghijk".to_string()]);
    }

    #[test]
    fn private_videos_are_reported_before_any_other_problem() {
        let mut item = live_item("xyz");
        item.status.privacy_status = PrivacyStatus::Private;
        item.status.embeddable = false;
        item.live_streaming_details = None;

        assert_eq!(classify_video(&item).as_deref(), Some("Video is not public"));
    }

    #[test]
    fn removed_uploads_are_reported_before_embeddability() {
        let mut item = live_item("xyz");
        item.status.upload_status = UploadStatus::Deleted;
        item.status.embeddable = false;

        assert_eq!(
            classify_video(&item).as_deref(),
            Some("Video is no longer available")
        );

        item.status.upload_status = UploadStatus::Rejected;
        assert_eq!(
            classify_video(&item).as_deref(),
            Some("Video is no longer available")
        );
    }

    #[test]
    fn non_embeddable_videos_are_reported() {
        let mut item = live_item("xyz");
        item.status.embeddable = false;

        assert_eq!(
            classify_video(&item).as_deref(),
            Some("Video is not embeddable")
        );
    }

    #[test]
    fn plain_uploads_are_not_live_streams() {
        let mut item = live_item("xyz");
        item.live_streaming_details = None;

        assert_eq!(
            classify_video(&item).as_deref(),
            Some("Video is not a live stream")
        );
    }

    #[test]
    fn ended_and_unstarted_streams_are_reported() {
        let mut item = live_item("xyz");
        item.live_streaming_details = Some(LiveStreamingDetails {
            actual_start_time: Some("2026-08-01T00:00:00Z".to_string()),
            actual_end_time: Some("2026-08-02T00:00:00Z".to_string()),
        });
        assert_eq!(
            classify_video(&item).as_deref(),
            Some("The live stream has ended")
        );

        item.live_streaming_details = Some(LiveStreamingDetails {
            actual_start_time: None,
            actual_end_time: None,
        });
        assert_eq!(
            classify_video(&item).as_deref(),
            Some("The live stream has not started yet")
        );
    }

    #[test]
    fn running_live_streams_are_healthy() {
        assert_eq!(classify_video(&live_item("xyz")), None);
    }

    #[test]
    fn ids_missing_from_the_response_do_not_exist() {
        let sites = vec![site(1, "Gone", Some("https://youtu.be/abc123def45"))];
        let candidates = build_candidates(&sites);

        let findings = resolve_findings(candidates, &HashMap::new());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].reason.as_deref(), Some("Video does not exist"));
    }

    #[test]
    fn local_errors_take_precedence_over_remote_state() {
        let sites = vec![site(1, "Broken", Some("nope"))];
        let candidates = build_candidates(&sites);

        let mut remote_errors = HashMap::new();
        remote_errors.insert("nope".to_string(), None);

        let findings = resolve_findings(candidates, &remote_errors);
        assert_eq!(
            findings[0].reason.as_deref(),
            Some("Video stream URL is invalid")
        );
    }

    #[test]
    fn healthy_streams_produce_no_alert() {
        let sites = vec![site(1, "Fine", Some("https://youtu.be/abc123def45"))];
        let candidates = build_candidates(&sites);

        let mut remote_errors = HashMap::new();
        remote_errors.insert("abc123def45".to_string(), None);

        let findings = resolve_findings(candidates, &remote_errors);
        assert!(findings[0].reason.is_none());

        let message = build_alert_message(&findings, "test", "C01", "https://app.test/");
        assert!(message.is_none());
    }

    #[test]
    fn alerts_carry_one_block_per_unhealthy_finding_plus_header() {
        let sites = vec![
            site(1, "Fine", Some("https://youtu.be/abc123def45")),
            site(2, "Gone", Some("https://youtu.be/gone0000000")),
            site(3, "Bad", Some("garbage")),
        ];
        let candidates = build_candidates(&sites);

        let mut remote_errors = HashMap::new();
        remote_errors.insert("abc123def45".to_string(), None);

        let findings = resolve_findings(candidates, &remote_errors);
        let message = build_alert_message(&findings, "staging", "C01", "https://app.test/")
            .expect("two findings are unhealthy");

        // header + divider + two findings
        assert_eq!(message.blocks.len(), 4);
        assert_eq!(message.channel, "C01");

        let rendered = serde_json::to_string(&message).unwrap();
        assert!(rendered.contains("Scheduled check of video streams in *staging* instance"));
        assert!(rendered.contains("Video does not exist"));
        assert!(rendered.contains("Video stream URL is invalid"));
        assert!(rendered.contains("https://app.test/sites/2"));
        assert!(!rendered.contains("Fine"));
    }

    #[test]
    fn youtube_response_parses_camel_case_payloads() {
        let payload = r#"{
            "items": [
                {
                    "id": "abc123def45",
                    "status": {
                        "privacyStatus": "public",
                        "embeddable": true,
                        "uploadStatus": "uploaded"
                    },
                    "liveStreamingDetails": { "actualStartTime": "2026-08-01T00:00:00Z" }
                },
                {
                    "id": "plainupload",
                    "status": {
                        "privacyStatus": "unlisted",
                        "embeddable": false,
                        "uploadStatus": "processed"
                    }
                }
            ]
        }"#;

        let response: YouTubeApiResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(classify_video(&response.items[0]), None);
        assert!(response.items[1].live_streaming_details.is_none());
        assert_eq!(
            response.items[1].status.privacy_status,
            PrivacyStatus::Unlisted
        );

        let empty: YouTubeApiResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn config_requires_all_four_values() {
        env::set_var("YOUTUBE_API_KEY", "key");
        env::set_var("SLACK_BOT_TOKEN", "token");
        env::set_var("SLACK_BOT_CHANNEL", "channel");
        env::remove_var("FRONT_END_BASE_URL");

        let err = StreamCheckConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("FRONT_END_BASE_URL"));

        env::set_var("FRONT_END_BASE_URL", "https://app.test/");
        let config = StreamCheckConfig::from_env().unwrap();
        assert_eq!(config.youtube_api_key, "key");

        env::remove_var("YOUTUBE_API_KEY");
        env::remove_var("SLACK_BOT_TOKEN");
        env::remove_var("SLACK_BOT_CHANNEL");
        env::remove_var("FRONT_END_BASE_URL");
    }
}
