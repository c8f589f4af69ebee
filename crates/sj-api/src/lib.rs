//! # sj-api
//!
//! The web routing and orchestration layer for swear-jar.

pub mod handlers;
pub mod middleware;

pub use handlers::AppState;

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use handlers::Message;

/// Configures the `/api` routes.
///
/// # Developer Note
/// Static files are mounted by the binary after this scope, so anything that
/// does not start with `/api` falls through to them.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            // Word lists
            .route("/lists", web::get().to(handlers::get_lists))
            .route("/lists", web::post().to(handlers::replace_lists))
            .route("/lists/{list}/words", web::post().to(handlers::add_word))
            .route("/lists/{list}/words", web::delete().to(handlers::remove_word))
            // Evaluation log
            .route("/log", web::get().to(handlers::get_log))
            .route("/log", web::post().to(handlers::append_log))
            // Scoring
            .route("/evaluate", web::post().to(handlers::evaluate)),
    );
}

/// Malformed JSON bodies answer 400 with the parser's message instead of
/// actix's plain-text default.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, HttpResponse::BadRequest().json(Message::new(message)))
            .into()
    })
}

/// Only `blacklist` and `whitelist` are valid `{list}` segments.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        InternalError::from_response(err, HttpResponse::NotFound().json(Message::new("list not found")))
            .into()
    })
}

/// A missing `word` query parameter is a 400 with a `{message}` body.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, HttpResponse::BadRequest().json(Message::new(message)))
            .into()
    })
}
