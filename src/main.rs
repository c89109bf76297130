mod config;
mod error;
mod model;
mod store;
mod web;

use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;

use config::Config;
use model::{ChatCompletion, OpenAiClient};
use store::{BookingLog, Listing};
use web::routes;

// App state structure
pub struct AppState {
    pub listings: Vec<Listing>,
    pub bookings: BookingLog,
    pub llm: Arc<dyn ChatCompletion>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting StayFinder API");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = Data::new(AppState {
        listings: store::seed_listings(),
        bookings: BookingLog::new(),
        llm: Arc::new(OpenAiClient::new(&config)),
    });

    let bind_addr = config.bind_addr();
    info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
