//! # sj-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.
//! Store failures never escape a handler: each one is turned into a status
//! code and a `{ "message": ... }` body here.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sj_core::{AppError, EvaluationLog, ListName, ListStore, Scorer, Verdict, WordLists};

/// State shared across all Actix-web workers.
pub struct AppState {
    pub lists: Box<dyn ListStore>,
    pub log: Box<dyn EvaluationLog>,
    /// `None` when no scoring backend is configured; `/api/evaluate` then answers 503.
    pub scorer: Option<Box<dyn Scorer>>,
}

/// Body of every JSON acknowledgement and error response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogEntryRequest {
    pub text: String,
    pub result: Verdict,
}

#[derive(Debug, Deserialize)]
pub struct AddWordRequest {
    pub word: String,
}

/// Query string of `DELETE /api/lists/{list}/words`. Taken from the query so
/// words containing `/` can be removed too.
#[derive(Debug, Deserialize)]
pub struct RemoveWordQuery {
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub text: String,
}

/// Maps a port failure to a response. `context` is the client-facing message
/// for storage and scoring failures; the detail only goes to the server log.
fn error_response(context: &str, err: &AppError) -> HttpResponse {
    match err {
        AppError::StorageUnavailable(_) => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().json(Message::new(context))
        }
        AppError::RemoteScoring(_) => {
            log::warn!("{context}: {err}");
            HttpResponse::BadGateway().json(Message::new(context))
        }
        AppError::ValidationError(_) => HttpResponse::BadRequest().json(Message::new(err.to_string())),
        AppError::NotFound(_) => HttpResponse::NotFound().json(Message::new(err.to_string())),
        AppError::NotConfigured(_) => {
            HttpResponse::ServiceUnavailable().json(Message::new(err.to_string()))
        }
    }
}

/// `GET /api/lists`
pub async fn get_lists(data: web::Data<AppState>) -> impl Responder {
    match data.lists.read().await {
        Ok(lists) => HttpResponse::Ok().json(lists),
        Err(e) => error_response("Error reading lists file", &e),
    }
}

/// `POST /api/lists`: wholesale replacement, absent lists become empty.
pub async fn replace_lists(
    data: web::Data<AppState>,
    body: web::Json<WordLists>,
) -> impl Responder {
    match data.lists.write(&body).await {
        Ok(()) => HttpResponse::Ok().json(Message::new("Lists updated successfully!")),
        Err(e) => error_response("Error writing to lists file", &e),
    }
}

/// `POST /api/lists/{list}/words`: normalized, deduplicated insert.
pub async fn add_word(
    data: web::Data<AppState>,
    path: web::Path<ListName>,
    body: web::Json<AddWordRequest>,
) -> impl Responder {
    let name = path.into_inner();

    let mut lists = match data.lists.read().await {
        Ok(lists) => lists,
        Err(e) => return error_response("Error reading lists file", &e),
    };

    match lists.add_word(name, &body.word) {
        Ok(true) => {
            if let Err(e) = data.lists.write(&lists).await {
                return error_response("Error writing to lists file", &e);
            }
            log::info!("added a word to the {name}");
        }
        Ok(false) => {}
        Err(e) => return error_response("Error adding word", &e),
    }

    HttpResponse::Ok().json(lists)
}

/// `DELETE /api/lists/{list}/words?word=...`: drops the word as given and in
/// its normalized form.
pub async fn remove_word(
    data: web::Data<AppState>,
    path: web::Path<ListName>,
    query: web::Query<RemoveWordQuery>,
) -> impl Responder {
    let name = path.into_inner();
    let word = query.into_inner().word;

    let mut lists = match data.lists.read().await {
        Ok(lists) => lists,
        Err(e) => return error_response("Error reading lists file", &e),
    };

    if lists.remove_word(name, &word) {
        if let Err(e) = data.lists.write(&lists).await {
            return error_response("Error writing to lists file", &e);
        }
        log::info!("removed a word from the {name}");
    }

    HttpResponse::Ok().json(lists)
}

/// `POST /api/log`
pub async fn append_log(
    data: web::Data<AppState>,
    body: web::Json<LogEntryRequest>,
) -> impl Responder {
    let entry = body.into_inner();
    if let Err(e) = entry.result.validate() {
        return error_response("Invalid log entry", &e);
    }

    match data.log.append(&entry.text, &entry.result).await {
        Ok(_) => HttpResponse::Ok().json(Message::new("Log entry added successfully!")),
        Err(e) => error_response("Error writing to log file", &e),
    }
}

/// `GET /api/log`: the whole report as plain text.
pub async fn get_log(data: web::Data<AppState>) -> impl Responder {
    match data.log.read_all().await {
        Ok(report) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(report),
        Err(e) => {
            log::error!("Error reading log file: {e}");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Error reading log file")
        }
    }
}

/// `POST /api/evaluate`: score with the current lists, then log the verdict.
///
/// A scoring failure logs nothing. A failed log append after a successful
/// score still returns the verdict.
pub async fn evaluate(
    data: web::Data<AppState>,
    body: web::Json<EvaluateRequest>,
) -> impl Responder {
    if body.text.trim().is_empty() {
        return HttpResponse::BadRequest().json(Message::new("Please write something to evaluate."));
    }

    let Some(scorer) = data.scorer.as_deref() else {
        return error_response(
            "Error evaluating text",
            &AppError::NotConfigured("no scoring backend".into()),
        );
    };

    let lists = match data.lists.read().await {
        Ok(lists) => lists,
        Err(e) => return error_response("Error reading lists file", &e),
    };

    let verdict = match scorer.score(&body.text, &lists).await {
        Ok(verdict) => verdict,
        Err(e) => return error_response("Error evaluating text", &e),
    };

    if let Err(e) = data.log.append(&body.text, &verdict).await {
        log::warn!("evaluation succeeded but could not be logged: {e}");
    }

    HttpResponse::Ok().json(verdict)
}
