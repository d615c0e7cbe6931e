use crate::config::ServerConfig;
use crate::connection::ws_index;
use actix_cors::Cors;
use actix_web::{web, HttpResponse};

pub fn root(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/").route(web::get().to(ws_index)))
        .service(web::resource("/health").route(web::get().to(health)));
}

pub fn cors(config: &ServerConfig) -> Cors {
    match &config.allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST"]),
        None => Cors::permissive(),
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}
