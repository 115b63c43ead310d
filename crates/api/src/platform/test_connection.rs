use crate::error::PingbellError;
use actix_web::{web, HttpResponse};
use pingbell_api_structs::dtos::ConnectionTestDTO;
use pingbell_api_structs::test_connection::RequestBody;
use pingbell_domain::Platform;
use pingbell_infra::{test_connection, PingbellContext};

/// Fires one real test POST at the webhook so the user can verify it
/// before saving. Used by the editing UI, never by the scheduled path.
pub async fn test_connection_controller(
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

    let res = test_connection(ctx.notifier.as_ref(), adapter, &body.url, &config).await;

    Ok(HttpResponse::Ok().json(ConnectionTestDTO {
        success: res.success,
        message: res.message,
        http_status: res.http_status,
    }))
}
