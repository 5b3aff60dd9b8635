pub mod api;
mod config;
#[cfg(test)]
mod test_util;

use std::sync::Arc;

use sqlx::sqlite::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(feature = "dev-tools")]
use axum_sql_viewer::SqlViewerLayer;
#[cfg(feature = "dev-tools")]
use tracing_web_console::TracingLayer;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    info(title = "Bus Transit API", version = "0.2.0"),
    paths(
        api::routes::list_routes,
        api::schedule::get_schedule,
        api::search::search_stops,
        api::updates::list_updates,
        api::updates::get_update,
        api::updates::create_update,
        api::updates::delete_update,
        api::admin::admin_login,
        api::buses::get_buses,
        api::health::health_check,
    ),
    components(schemas(
        api::ErrorResponse,
        api::routes::Route,
        api::schedule::ScheduleResponse,
        api::search::SearchResult,
        api::updates::ServiceUpdate,
        api::updates::CreateUpdateRequest,
        api::updates::CreateUpdateResponse,
        api::updates::DeleteUpdateResponse,
        api::admin::LoginRequest,
        api::admin::LoginResponse,
        api::buses::Bus,
        api::buses::BusListResponse,
        api::health::HealthResponse,
    )),
    tags(
        (name = "routes", description = "Bus route listings"),
        (name = "schedule", description = "Per-route departure times and stop order"),
        (name = "search", description = "Stop and route name search"),
        (name = "updates", description = "Service update feed"),
        (name = "admin", description = "Admin password check"),
        (name = "buses", description = "Simulated live bus positions"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info,sqlx=warn".into()),
        )
        .init();

    // Load config
    let config = Config::load("config.yaml").expect("Failed to load config");
    tracing::info!(listen_addr = %config.listen_addr, "Loaded configuration");

    // Build CORS layer based on config
    let cors_layer = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode explicitly enabled (all origins allowed) - DO NOT USE IN PRODUCTION");
        CorsLayer::permissive()
    } else if !config.cors_origins.is_empty() {
        tracing::info!(origins = ?config.cors_origins, "CORS: Restricting to configured origins");
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    } else {
        panic!("CORS configuration error: Either set 'cors_origins' with allowed origins, or set 'cors_permissive: true' for development");
    };

    // Initialize SQLite database
    let pool = SqlitePool::connect(&config.database_url)
        .await
        .unwrap_or_else(|e| panic!("Database connection failed: {}", e));

    // Run migrations (schema + seed data)
    let migrator = sqlx::migrate!("./migrations");
    tracing::info!(migrations = migrator.migrations.len(), "Found migrations");
    migrator.run(&pool).await.expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    let admin_password: Arc<str> = Arc::from(config.admin_password.as_str());

    // Build the app
    #[allow(unused_mut)] // mut needed when dev-tools feature is enabled
    let mut app = api::router(pool.clone(), admin_password)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    // Add dev tools only when feature is enabled
    #[cfg(feature = "dev-tools")]
    {
        let tracing_layer = TracingLayer::new("/tracing");
        app = app
            .merge(SqlViewerLayer::sqlite("/sql-viewer", pool.clone()).into_router())
            .merge(tracing_layer.into_router());
        tracing::warn!("Dev tools enabled: SQL Viewer and Tracing Console are accessible");
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", config.listen_addr, e));

    tracing::info!("Server running on http://{}", config.listen_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui", config.listen_addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
