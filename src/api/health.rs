use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::api::AppState;

/// Health check endpoint for load balancers
#[get("")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy"
    }))
}

/// Readiness check - ready once the first refresh has been published
#[get("/ready")]
pub async fn readiness_check(state: web::Data<AppState>) -> impl Responder {
    match state.store.latest().await {
        Some(snapshot) => HttpResponse::Ok().json(json!({
            "status": "ready",
            "last_updated": snapshot.updated_at
        })),
        None => HttpResponse::ServiceUnavailable().json(json!({
            "status": "not_ready",
            "last_updated": null
        })),
    }
}

/// Liveness check - simple check to see if the app is alive
#[get("/live")]
pub async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Basic metrics endpoint
#[get("/metrics")]
pub async fn metrics_endpoint(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.store.latest().await;
    let active = snapshot.as_ref().map_or(0, |s| s.result.count());
    let age = snapshot.as_ref().map_or(-1, |s| s.age_seconds());

    let prometheus_metrics = format!(
        "# HELP fmi_warnings_active Active weather warnings after area filtering\n\
         # TYPE fmi_warnings_active gauge\n\
         fmi_warnings_active {}\n\
         # HELP fmi_warnings_snapshot_age_seconds Seconds since the last successful refresh (-1 before the first)\n\
         # TYPE fmi_warnings_snapshot_age_seconds gauge\n\
         fmi_warnings_snapshot_age_seconds {}\n",
        active, age
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(prometheus_metrics)
}

pub fn routes() -> actix_web::Scope {
    web::scope("/health")
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check)
        .service(metrics_endpoint)
}
