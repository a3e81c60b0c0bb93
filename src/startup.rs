use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::configuration::Settings;
use crate::routes::{analyze_route, default_route, reach_route};

pub fn run_analyze(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::analyze_root)
            .service(analyze_route::analyze)
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn run_reach(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::reach_root)
            .service(reach_route::reach)
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
