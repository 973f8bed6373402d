use crate::models::{NewSite, Site};
use crate::services::site_service;
use crate::AppState;
use log::{error, info};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};

#[get("/")]
pub async fn list_sites(state: &State<AppState>) -> Result<Json<Vec<Site>>, Status> {
    match site_service::list_sites(&state.pool).await {
        Ok(sites) => {
            info!("Found {} registered sites.", sites.len());
            Ok(Json(sites))
        }
        Err(e) => {
            error!("Failed to list sites: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[get("/<id>")]
pub async fn get_site(id: i64, state: &State<AppState>) -> Result<Json<Site>, Status> {
    match site_service::get_site(&state.pool, id).await {
        Ok(Some(site)) => Ok(Json(site)),
        Ok(None) => Err(Status::NotFound),
        Err(e) => {
            error!("Failed to fetch site {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[post("/", data = "<site>")]
pub async fn create_site(
    site: Json<NewSite>,
    state: &State<AppState>,
) -> Result<Json<Site>, Status> {
    match site_service::create_site(&state.pool, &site.into_inner()).await {
        Ok(created) => {
            info!("Created site {} ({:?})", created.id, created.name);
            Ok(Json(created))
        }
        Err(e) => {
            error!("Failed to create site: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[put("/<id>", data = "<site>")]
pub async fn update_site(
    id: i64,
    site: Json<NewSite>,
    state: &State<AppState>,
) -> Result<Json<Site>, Status> {
    match site_service::update_site(&state.pool, id, &site.into_inner()).await {
        Ok(Some(updated)) => Ok(Json(updated)),
        Ok(None) => Err(Status::NotFound),
        Err(e) => {
            error!("Failed to update site {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}

#[delete("/<id>")]
pub async fn delete_site(id: i64, state: &State<AppState>) -> Result<Status, Status> {
    match site_service::delete_site(&state.pool, id).await {
        Ok(true) => Ok(Status::NoContent),
        Ok(false) => Err(Status::NotFound),
        Err(e) => {
            error!("Failed to delete site {id}: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}
