use axum::Json;
use shared::{ApiInfo, HealthResponse};

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn info() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Hoyoverse Codes Hub API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
