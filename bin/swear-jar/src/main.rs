//! # swear-jar Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod settings;

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use secrecy::SecretString;
use sj_api::{configure_routes, middleware, AppState};
use sj_core::Scorer;

use crate::settings::Settings;

#[cfg(feature = "scorer-gemini")]
use sj_scorer_gemini::GeminiScorer;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut settings = Settings::load().context("loading configuration")?;

    // 1. Initialize Storage Implementation
    tokio::fs::create_dir_all(&settings.data_dir)
        .await
        .with_context(|| format!("creating data directory {}", settings.data_dir.display()))?;
    let (lists, log) = sj_store_fs::open(&settings.data_dir);

    // 2. Initialize Scoring Implementation
    let api_key = settings.gemini_api_key.take();
    let scorer = build_scorer(&settings, api_key);

    // 3. Wrap in AppState (Using dynamic dispatch for maximum flexibility)
    let state = web::Data::new(AppState {
        lists: Box::new(lists),
        log: Box::new(log),
        scorer,
    });

    let static_dir = settings.static_dir.clone();
    if let Some(dir) = &static_dir {
        log::info!("serving static files from {}", dir.display());
    }
    log::info!(
        "swear-jar starting on http://{}:{} (data in {})",
        settings.host,
        settings.port,
        settings.data_dir.display()
    );

    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .wrap(middleware::security_headers())
            .wrap(middleware::cors_policy())
            .wrap(middleware::standard_middleware())
            .configure(configure_routes);
        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind((settings.host.as_str(), settings.port))
    .with_context(|| format!("binding {}:{}", settings.host, settings.port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(feature = "scorer-gemini")]
fn build_scorer(settings: &Settings, api_key: Option<SecretString>) -> Option<Box<dyn Scorer>> {
    use secrecy::ExposeSecret;

    let Some(api_key) = api_key.filter(|k| !k.expose_secret().trim().is_empty()) else {
        log::warn!("no Gemini API key configured; /api/evaluate is disabled");
        return None;
    };
    log::info!("scoring with Gemini model {}", settings.gemini_model);
    Some(Box::new(
        GeminiScorer::new(api_key, settings.gemini_model.clone())
            .with_base_url(settings.gemini_base_url.clone()),
    ))
}

#[cfg(not(feature = "scorer-gemini"))]
fn build_scorer(_settings: &Settings, _api_key: Option<SecretString>) -> Option<Box<dyn Scorer>> {
    log::info!("built without a scoring backend; /api/evaluate is disabled");
    None
}
