use crate::models::{NewSurvey, NewSurveyMedia, Survey, SurveyDetails, SurveyMedia};
use crate::services::{site_service, survey_service};
use crate::AppState;
use log::{error, info};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};

#[get("/<site_id>/surveys")]
pub async fn list_site_surveys(
    site_id: i64,
    state: &State<AppState>,
) -> Result<Json<Vec<Survey>>, Status> {
    match survey_service::list_site_surveys(&state.pool, site_id).await {
        Ok(surveys) => Ok(Json(surveys)),
        Err(e) => {
            error!("Failed to list surveys for site {site_id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[post("/<site_id>/surveys", data = "<survey>")]
pub async fn create_survey(
    site_id: i64,
    survey: Json<NewSurvey>,
    state: &State<AppState>,
) -> Result<Json<Survey>, Status> {
    match site_service::get_site(&state.pool, site_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(Status::NotFound),
        Err(e) => {
            error!("Failed to fetch site {site_id}: {e:?}");
            return Err(Status::InternalServerError);
        }
    }

    match survey_service::create_survey(&state.pool, site_id, &survey.into_inner()).await {
        Ok(created) => {
            info!("Created survey {} for site {site_id}", created.id);
            Ok(Json(created))
        }
        Err(e) => {
            error!("Failed to create survey for site {site_id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[get("/<id>")]
pub async fn get_survey(id: i64, state: &State<AppState>) -> Result<Json<SurveyDetails>, Status> {
    let survey = match survey_service::get_survey(&state.pool, id).await {
        Ok(Some(survey)) => survey,
        Ok(None) => return Err(Status::NotFound),
        Err(e) => {
            error!("Failed to fetch survey {id}: {e:?}");
            return Err(Status::InternalServerError);
        }
    };

    match survey_service::list_survey_media_items(&state.pool, id).await {
        Ok(media) => Ok(Json(SurveyDetails { survey, media })),
        Err(e) => {
            error!("Failed to fetch media for survey {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[put("/<id>", data = "<survey>")]
pub async fn update_survey(
    id: i64,
    survey: Json<NewSurvey>,
    state: &State<AppState>,
) -> Result<Json<Survey>, Status> {
    match survey_service::update_survey(&state.pool, id, &survey.into_inner()).await {
        Ok(Some(updated)) => Ok(Json(updated)),
        Ok(None) => Err(Status::NotFound),
        Err(e) => {
            error!("Failed to update survey {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[delete("/<id>")]
pub async fn delete_survey(id: i64, state: &State<AppState>) -> Result<Status, Status> {
    match survey_service::delete_survey(&state.pool, id).await {
        Ok(true) => Ok(Status::NoContent),
        Ok(false) => Err(Status::NotFound),
        Err(e) => {
            error!("Failed to delete survey {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[get("/<id>/media")]
pub async fn list_survey_media(
    id: i64,
    state: &State<AppState>,
) -> Result<Json<Vec<SurveyMedia>>, Status> {
    match survey_service::list_survey_media_items(&state.pool, id).await {
        Ok(media) => Ok(Json(media)),
        Err(e) => {
            error!("Failed to list media for survey {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[post("/<id>/media", data = "<media>")]
pub async fn add_survey_media(
    id: i64,
    media: Json<NewSurveyMedia>,
    state: &State<AppState>,
) -> Result<Json<SurveyMedia>, Status> {
    match survey_service::get_survey(&state.pool, id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(Status::NotFound),
        Err(e) => {
            error!("Failed to fetch survey {id}: {e:?}");
            return Err(Status::InternalServerError);
        }
    }

    match survey_service::add_survey_media(&state.pool, id, &media.into_inner()).await {
        Ok(created) => Ok(Json(created)),
        Err(e) => {
            error!("Failed to add media to survey {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[put("/<id>", data = "<media>")]
pub async fn update_media(
    id: i64,
    media: Json<NewSurveyMedia>,
    state: &State<AppState>,
) -> Result<Json<SurveyMedia>, Status> {
    match survey_service::update_survey_media(&state.pool, id, &media.into_inner()).await {
        Ok(Some(updated)) => Ok(Json(updated)),
        Ok(None) => Err(Status::NotFound),
        Err(e) => {
            error!("Failed to update survey media {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[delete("/<id>")]
pub async fn delete_media(id: i64, state: &State<AppState>) -> Result<Status, Status> {
    match survey_service::delete_survey_media(&state.pool, id).await {
        Ok(true) => Ok(Status::NoContent),
        Ok(false) => Err(Status::NotFound),
        Err(e) => {
            error!("Failed to delete survey media {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}
