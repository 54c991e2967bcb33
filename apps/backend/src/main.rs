use actix_web::{web, App, HttpServer};
use backend::cors_middleware;
use backend::routes;
use backend::telemetry;
use backend::AppState;
use data::{connect_to_postgres, EnvSource};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: via docker-compose env_file or docker run --env-file
    // - Local dev: a .env file next to the binary (loaded below)
    dotenvy::dotenv().ok();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    // The bootstrap is the startup gate: no HTTP socket is bound until
    // the database is connected, migrated, and drift-free.
    let handle = match connect_to_postgres(&EnvSource).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("postgres bootstrap failed: {e}");
            std::process::exit(1);
        }
    };

    info!("database connected, migrations applied, schema verified");
    info!(%host, port, "starting backend");

    let data = web::Data::new(AppState::new(handle.orm));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
