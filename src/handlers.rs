//! HTTP handlers for the ping and search endpoints.

use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::{FailureReason, SearchFailure};
use crate::models::SearchRequest;
use crate::service::GistSearchService;

/// Register all routes on an actix `App`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(ping)).service(
        web::resource("/api/v1/search")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(web::post().to(search)),
    );
}

/// GET /ping
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("pong")
}

/// POST /api/v1/search
///
/// Body: `{"username": "...", "pattern": "..."}`. Responds with the URLs of
/// gists that have a file whose content matches `pattern` from its start.
pub async fn search(
    service: web::Data<GistSearchService>,
    body: web::Json<SearchRequest>,
) -> Result<HttpResponse, SearchFailure> {
    let result = service.handle_search(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Report unreadable bodies as invalid requests in the usual error payload.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    SearchFailure::from(FailureReason::InvalidRequest(err.to_string())).into()
}
