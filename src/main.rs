use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{get, App, HttpServer, Responder};
use dotenvy::dotenv;
use std::path::Path;

mod api;
mod config;
mod db;
mod docs;
mod engine;
mod model;
mod routes;

use config::Config;
use db::init_db;
use engine::roster::ShiftRoster;

use crate::docs::ApiDoc;
use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance report service"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    // A missing roster is a configuration error; nothing can be classified
    // without shift profiles, so the run halts here.
    let roster = match ShiftRoster::load(Path::new(&config.shift_roster), &config.engine()) {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, path = %config.shift_roster, "Unable to load shift roster");
            return Err(std::io::Error::other(e));
        }
    };

    let pool = init_db(&config.database_url).await;

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(roster.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
