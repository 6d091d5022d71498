use actix_web::{get, web, HttpResponse};

use super::types::{CountResponse, SensorView};
use crate::{
    api::AppState,
    errors::{AppError, AppResult},
};

/// Full sensor view: count as state, alerts as attributes.
#[get("")]
pub async fn get_warnings(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let snapshot = state.store.latest().await.ok_or(AppError::NoDataYet)?;
    Ok(HttpResponse::Ok().json(SensorView::new(&state.filter, &snapshot)))
}

#[get("/count")]
pub async fn get_count(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(CountResponse {
        active_warnings: state.store.active_warnings().await,
    })
}

/// One alert by its position in the current list.
#[get("/{index}")]
pub async fn get_warning(
    state: web::Data<AppState>,
    index: web::Path<usize>,
) -> AppResult<HttpResponse> {
    let snapshot = state.store.latest().await.ok_or(AppError::NoDataYet)?;
    let record = snapshot
        .result
        .records()
        .get(index.into_inner())
        .ok_or_else(|| AppError::resource_not_found("Warning"))?;
    Ok(HttpResponse::Ok().json(record))
}
