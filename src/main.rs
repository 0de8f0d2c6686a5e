use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;

use crewcal::database::{
    init_database,
    repositories::{
        AvailabilityRequestRepository, ClientRepository, ShootRepository, SlotRepository,
    },
};
use crewcal::handlers::{blocks, calendar, clients, requests, shoots};
use crewcal::middleware::RequestIdMiddleware;
use crewcal::{BookingService, Config};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("CrewCal scheduling API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("Starting CrewCal API server...");

    // Load configuration
    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    // Initialize repositories and services
    let slot_repository = SlotRepository::new(pool.clone());
    let shoot_repository = ShootRepository::new(pool.clone());
    let client_repository = ClientRepository::new(pool.clone());
    let request_repository = AvailabilityRequestRepository::new(pool.clone());
    let booking_service = BookingService::new(
        shoot_repository.clone(),
        client_repository.clone(),
        request_repository.clone(),
        slot_repository.clone(),
    );

    let slot_repo_data = web::Data::new(slot_repository);
    let shoot_repo_data = web::Data::new(shoot_repository);
    let client_repo_data = web::Data::new(client_repository);
    let request_repo_data = web::Data::new(request_repository);
    let booking_data = web::Data::new(booking_service);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(slot_repo_data.clone())
            .app_data(shoot_repo_data.clone())
            .app_data(client_repo_data.clone())
            .app_data(request_repo_data.clone())
            .app_data(booking_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                        "X-Role",
                        "X-Agency-Id",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .route("/calendar", web::get().to(calendar::get_calendar))
                    .service(
                        web::scope("/blocks")
                            .route("", web::get().to(blocks::get_blocks))
                            .route("", web::post().to(blocks::create_block))
                            .route("/{id}", web::put().to(blocks::update_block))
                            .route("/{id}", web::delete().to(blocks::delete_block)),
                    )
                    .service(
                        web::scope("/shoots")
                            .route("", web::get().to(shoots::get_shoots))
                            .route("", web::post().to(shoots::create_shoot))
                            .route("/request", web::post().to(shoots::request_shoot))
                            .route("/{id}", web::get().to(shoots::get_shoot))
                            .route("/{id}/approve", web::post().to(shoots::approve_shoot))
                            .route("/{id}/deny", web::post().to(shoots::deny_shoot))
                            .route("/{id}/finish", web::post().to(shoots::finish_shoot))
                            .route("/{id}/revert", web::post().to(shoots::revert_shoot))
                            .route("/{id}/blocking", web::post().to(shoots::set_blocking))
                            .route("/{id}/time", web::put().to(shoots::update_shoot_time))
                            .route("/{id}/client", web::put().to(shoots::update_shoot_client)),
                    )
                    .service(
                        web::scope("/requests")
                            .route("", web::get().to(requests::get_requests))
                            .route("", web::post().to(requests::create_request))
                            .route("/{id}/approve", web::post().to(requests::approve_request))
                            .route("/{id}/reject", web::post().to(requests::reject_request)),
                    )
                    .route("/clients", web::get().to(clients::get_clients)),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
