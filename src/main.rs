use actix_web::{middleware::Logger, web, App, HttpServer};

use quizzify_server::{app_state::AppState, config::Config, handlers};

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        log::error!("{}", e);
        return Err(std::io::Error::other(e.to_string()));
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let state = AppState::new(config)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
