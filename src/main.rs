use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use car_rental_api::application::service::RentalService;
use car_rental_api::data::memory::{InMemoryBookingRepository, InMemoryCarRepository};
use car_rental_api::data::user_repository::InMemoryUserRepository;
use car_rental_api::infrastructure::logging::init_logging;
use car_rental_api::presentation::handlers::{
    AppState, create_booking, health_check, json_error_handler, list_bookings, list_cars,
    register_user,
};
use car_rental_api::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    info!("Creating in-memory repositories");
    let cars = Arc::new(InMemoryCarRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let bookings = Arc::new(InMemoryBookingRepository::new());

    let service = RentalService::new(cars, users, bookings);

    info!("Seeding car catalog");
    service
        .seed_catalog()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = web::Data::new(AppState { service });

    let server = HttpServer::new(move || {
        // Permissive CORS so the static web page can call the API directly.
        App::new()
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Cors::permissive())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health_check))
                    .route("/cars", web::get().to(list_cars))
                    .route("/users", web::post().to(register_user))
                    .route("/book", web::post().to(create_booking))
                    .route("/bookings", web::get().to(list_bookings)),
            )
    });

    let bind_addr =
        std::env::var("RENTAL_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!(address = %bind_addr, "Binding server to address");
    let server = server.bind(bind_addr.as_str())?;

    info!(
        address = %bind_addr,
        routes = %"GET /api/health, GET /api/cars, POST /api/users, POST /api/book, GET /api/bookings",
        "Starting HTTP server"
    );
    server.run().await
}
