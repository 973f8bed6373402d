use crate::config::INSTANCE_NAME;
use crate::services::stream_check::{self, StreamCheckConfig};
use crate::AppState;
use log::error;
use rocket::http::Status;
use rocket::{post, State};

/// Manual trigger for the scheduled video stream audit.
#[post("/check-stream")]
pub async fn check_streams(state: &State<AppState>) -> Result<Status, Status> {
    let config = match StreamCheckConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Video stream check is not configured: {e}");
            return Err(Status::ServiceUnavailable);
        }
    };

    match stream_check::check_video_streams(&state.pool, &config, INSTANCE_NAME.as_str()).await {
        Ok(_) => Ok(Status::Ok),
        Err(e) => {
            error!("Manual video stream check failed: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}
