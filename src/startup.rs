use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use crate::{
    routes::{default_route, search_route, user_route},
    services::{GooglePlacesClient, SearchOrchestrator},
};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    orchestrator: SearchOrchestrator<GooglePlacesClient>,
) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);
    let orchestrator = web::Data::new(orchestrator);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(
                web::scope("/search")
                    .service(search_route::search)
                    .service(search_route::history)
                    .service(search_route::results),
            )
            .service(
                web::scope("/user")
                    .service(user_route::register)
                    .service(user_route::quota_status),
            )
            .app_data(db_pool.clone())
            .app_data(orchestrator.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
