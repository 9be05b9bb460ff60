use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::Settings,
    routes::{default_route, download_route, results_route, scrape_route, upload_route},
};

pub fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::home)
            .service(upload_route::upload)
            .service(results_route::results)
            .service(scrape_route::start_scrape)
            .service(download_route::download)
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
