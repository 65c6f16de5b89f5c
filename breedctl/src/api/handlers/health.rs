use axum::http::StatusCode;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Liveness check",
    responses(
        (status = 200, description = "Service is running")
    )
)]
pub async fn health() -> StatusCode {
    StatusCode::OK
}
