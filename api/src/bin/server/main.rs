use std::sync::Arc;

use api::config::Config;
use api::config::StorageBackend;
use api::domain::post::ports::PostRepository;
use api::domain::post::service::PostService;
use api::domain::user::ports::UserRepository;
use api::domain::user::service::UserService;
use api::inbound::http::router::create_router;
use api::outbound::repositories::InMemoryPostRepository;
use api::outbound::repositories::InMemoryUserRepository;
use api::outbound::repositories::PostgresPostRepository;
use api::outbound::repositories::PostgresUserRepository;
use auth::Authenticator;
use axum::Router;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MIN_SECRET_BYTES: usize = 32;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        token_ttl_seconds = config.jwt.expiration_seconds,
        "Configuration loaded"
    );

    if config.jwt.secret.len() < MIN_SECRET_BYTES {
        tracing::warn!(
            min_bytes = MIN_SECRET_BYTES,
            "JWT secret is shorter than recommended"
        );
    }

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::seconds(config.jwt.expiration_seconds),
    ));

    let http_application = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            application(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresPostRepository::new(pg_pool)),
                authenticator,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            application(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryPostRepository::new()),
                authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited");

    Ok(())
}

fn application<UR, PR>(users: Arc<UR>, posts: Arc<PR>, authenticator: Arc<Authenticator>) -> Router
where
    UR: UserRepository,
    PR: PostRepository,
{
    let user_service = Arc::new(UserService::new(
        Arc::clone(&users),
        Arc::clone(&authenticator),
    ));
    let post_service = Arc::new(PostService::new(posts, users));

    create_router(user_service, post_service, authenticator)
}
