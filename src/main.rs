use lending_records::{
    adapters::memory::MemoryStore,
    adapters::postgres::{
        PostgresBookRepository, PostgresCategoryRepository, PostgresPersonRepository,
    },
    api::{handlers::AppState, router::create_router},
    application::lending::ServiceDependencies,
    config::{AppConfig, StoreBackend},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let service_deps = match config.database.backend {
        StoreBackend::Postgres => {
            // Initialize database connection pool
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;

            tracing::info!("Connection with database established");

            if config.database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database schema is up to date");
            }

            ServiceDependencies {
                books: Arc::new(PostgresBookRepository::new(pool.clone())),
                categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
                people: Arc::new(PostgresPersonRepository::new(pool)),
            }
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            let store = MemoryStore::new();
            ServiceDependencies {
                books: store.books(),
                categories: store.categories(),
                people: store.people(),
            }
        }
    };

    // Create application state
    let app_state = Arc::new(AppState {
        service_deps,
        response_style: config.api.response_style,
    });

    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
