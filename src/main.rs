use std::io;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpServer};

use taskboard::auth::SessionTokens;
use taskboard::config::Config;
use taskboard::llm::LlmClient;
use taskboard::state::{cors, AppState};
use taskboard::store::{PgStore, Store};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    let pg = PgStore::connect(
        &config.database_url,
        config.database_max_connections,
        config.store_timeout,
    )
    .await
    .map_err(|e| startup_error("Failed to connect to database", e))?;
    pg.migrate()
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;

    let store = Store::new(pg, config.store_timeout);
    let tokens = SessionTokens::new(&config.jwt_secret);
    let llm = LlmClient::new(
        config.openai_api_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    )
    .map_err(|e| startup_error("Failed to build AI client", e))?;
    if config.openai_api_key.is_none() {
        log::warn!("OPENAI_API_KEY is not set; /ai routes will fail");
    }

    let state = AppState::new(store, tokens, llm);
    let cors_origin = config.cors_allowed_origin.clone();

    log::info!("Starting Taskboard server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(cors(cors_origin.as_deref()))
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
