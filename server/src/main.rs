use actix_web::{middleware, web, App, HttpServer};

use whiteboard_server::config::ServerConfig;
use whiteboard_server::handlers;
use whiteboard_server::server::spawn_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    let srv_tx = spawn_server(config.channel_capacity);

    let (host, port) = config.bind_address();
    log::info!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(handlers::cors(&config))
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(srv_tx.clone()))
            .configure(handlers::root)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
