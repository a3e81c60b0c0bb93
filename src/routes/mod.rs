pub mod analyze_route;
pub mod default_route;
pub mod reach_route;

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

/// 500 with the `{"detail": ...}` payload both services use for every
/// failure class.
pub(crate) fn internal_error(detail: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorDetail { detail })
}
