use actix_cors::Cors;
use actix_web::web;

use crate::error::ApiError;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/search", web::post().to(handlers::search))
            .route("/book", web::post().to(handlers::book))
            .route("/chat", web::post().to(handlers::chat)),
    )
    .route("/", web::get().to(handlers::home))
    .route("/assistant", web::post().to(handlers::assistant))
    .route("/test", web::get().to(handlers::models_count));
}

// Any origin, method and header.
pub fn cors() -> Cors {
    Cors::permissive()
}
