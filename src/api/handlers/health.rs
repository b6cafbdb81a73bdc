#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = String, content_type = "text/plain")
    ),
    tag = "system"
)]
pub async fn health_check() -> &'static str {
    "Image relay service running"
}
