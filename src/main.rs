use std::{net::TcpListener, time::Duration};

use env_logger::Env;
use prospector::{
    configuration::get_configuration,
    services::{GooglePlacesClient, SearchOrchestrator, SiteInspector},
    startup::run,
};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let pool_options = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(15 * 60)) // 15 minutes
        .max_lifetime(None);

    let connection_pool = pool_options.connect_lazy_with(configuration.database.with_db());
    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let places_client = GooglePlacesClient::new(configuration.api_keys.google_places);
    let inspector = SiteInspector::new();
    let orchestrator = SearchOrchestrator::new(places_client, inspector, &configuration.search);

    run(listener, connection_pool, orchestrator)?.await
}
