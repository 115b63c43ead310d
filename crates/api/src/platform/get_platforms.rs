use crate::error::PingbellError;
use actix_web::{web, HttpResponse};
use pingbell_api_structs::get_platforms::APIResponse;
use pingbell_infra::PingbellContext;

/// Supported platform identifiers, in the stable order UIs should list
/// them in
pub async fn get_platforms_controller(
    ctx: web::Data<PingbellContext>,
) -> Result<HttpResponse, PingbellError> {
    let platforms = ctx
        .platforms
        .supported_platforms()
        .into_iter()
        .map(|platform| platform.to_string())
        .collect();

    Ok(HttpResponse::Ok().json(APIResponse { platforms }))
}
