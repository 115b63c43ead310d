use crate::error::PingbellError;
use actix_web::{web, HttpResponse};
use pingbell_api_structs::detect_platform::{APIResponse, RequestBody};
use pingbell_infra::PingbellContext;

/// Auto-detects the platform from a pasted webhook URL. A miss is an
/// empty answer, never a guess: the UI must then ask the user to pick.
pub async fn detect_platform_controller(
    ctx: web::Data<PingbellContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, PingbellError> {
    let platform = ctx
        .platforms
        .detect_from_url(&body.url)
        .map(|platform| platform.to_string());

    Ok(HttpResponse::Ok().json(APIResponse { platform }))
}
