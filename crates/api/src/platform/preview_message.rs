use crate::error::PingbellError;
use actix_web::{web, HttpResponse};
use pingbell_api_structs::preview_message::{APIResponse, RequestBody};
use pingbell_domain::Platform;
use pingbell_infra::PingbellContext;

/// Renders what a reminder would look like on the target platform without
/// any network I/O. Shares the adapter's formatting decisions, so the
/// preview cannot drift from what delivery actually sends.
pub async fn preview_message_controller(
    ctx: web::Data<PingbellContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, PingbellError> {
    let body = body.into_inner();
    let platform: Platform = body
        .platform
        .parse()
        .map_err(|_| PingbellError::BadClientData(format!(
            "Platform {} is not supported",
            body.platform
        )))?;
    let adapter = ctx.platforms.get(platform);

    let config = match body.config {
        Some(config) if config.platform() == platform => config,
        Some(_) => {
            return Err(PingbellError::BadClientData(
                "The platform config does not belong to the selected platform".to_string(),
            ))
        }
        None => adapter.default_config(),
    };

    let preview = adapter
        .message_preview(&body.content, &config)
        .map_err(|e| PingbellError::BadClientData(e.to_string()))?;

    Ok(HttpResponse::Ok().json(APIResponse { preview }))
}
